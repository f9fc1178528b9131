use pg_escape::quote_literal;

use crate::errors::{GenerationError, Result};
use crate::output::EventRecord;
use crate::output::json::to_ascii_json;

/// Render one `INSERT INTO events` statement.
///
/// Text values are emitted as SQL string literals and the payload as a JSON
/// literal, so nothing inside them can terminate the statement.
pub fn encode_event(event: &EventRecord<'_>) -> Result<String> {
    let data = to_ascii_json(event.payload)?;
    let event_id = event.event_id;
    let entity_id = sql_literal(event.entity_id)?;
    let event_name = sql_literal(event.event_name)?;
    let data = sql_literal(&data)?;

    Ok(format!(
        "\n\nINSERT INTO events (id, entity_id, event_name, data)\n\
         VALUES (\n    {event_id},\n    {entity_id},\n    {event_name},\n    {data}\n);\n"
    ))
}

/// Quote `value` as a Postgres string literal.
///
/// Postgres text cannot hold NUL, so such values are rejected.
pub fn sql_literal(value: &str) -> Result<String> {
    if value.contains('\0') {
        return Err(GenerationError::Encoding(
            "sql literal cannot contain a NUL character".to_string(),
        ));
    }
    // Escape-string literals may come back with a leading space (` E'...'`).
    Ok(quote_literal(value).trim_start().to_string())
}
