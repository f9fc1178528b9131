use std::collections::BTreeMap;
use std::fs::{File, create_dir_all};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::model::GenerateOptions;

/// The two parallel output streams of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StreamKind {
    /// SQL `INSERT INTO events` statements.
    Events,
    /// MongoDB `insertOne` snapshot statements.
    Snapshots,
}

impl StreamKind {
    pub fn extension(self) -> &'static str {
        match self {
            StreamKind::Events => "sql",
            StreamKind::Snapshots => "js",
        }
    }

    pub fn comment_prefix(self) -> &'static str {
        match self {
            StreamKind::Events => "--",
            StreamKind::Snapshots => "//",
        }
    }
}

/// Directory-like destination for generated scripts.
pub trait OutputSink {
    type Writer: Write;

    /// Create (or truncate) `file_name` in the given stream.
    fn create(&mut self, stream: StreamKind, file_name: &str) -> io::Result<Self::Writer>;
}

/// Sink writing each stream into its own directory.
#[derive(Debug, Clone)]
pub struct FsSink {
    events_dir: PathBuf,
    snapshots_dir: PathBuf,
}

impl FsSink {
    pub fn new(events_dir: PathBuf, snapshots_dir: PathBuf) -> Self {
        Self {
            events_dir,
            snapshots_dir,
        }
    }

    /// Create the stream directories under `root` and return a sink for them.
    pub fn prepare(root: &Path, options: &GenerateOptions) -> io::Result<Self> {
        let events_dir = root.join(&options.events_dir);
        let snapshots_dir = root.join(&options.snapshots_dir);
        create_dir_all(&events_dir)?;
        create_dir_all(&snapshots_dir)?;
        Ok(Self::new(events_dir, snapshots_dir))
    }

    pub fn dir(&self, stream: StreamKind) -> &Path {
        match stream {
            StreamKind::Events => &self.events_dir,
            StreamKind::Snapshots => &self.snapshots_dir,
        }
    }
}

impl OutputSink for FsSink {
    type Writer = BufWriter<File>;

    fn create(&mut self, stream: StreamKind, file_name: &str) -> io::Result<Self::Writer> {
        let file = File::create(self.dir(stream).join(file_name))?;
        Ok(BufWriter::new(file))
    }
}

type MemoryFiles = Arc<Mutex<BTreeMap<(StreamKind, String), Vec<u8>>>>;

/// In-memory sink; clones share the same files.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    files: MemoryFiles,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// File names written to `stream`, in name order.
    pub fn file_names(&self, stream: StreamKind) -> Vec<String> {
        self.lock()
            .keys()
            .filter(|(kind, _)| *kind == stream)
            .map(|(_, name)| name.clone())
            .collect()
    }

    pub fn contents(&self, stream: StreamKind, file_name: &str) -> Option<String> {
        self.lock()
            .get(&(stream, file_name.to_string()))
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<(StreamKind, String), Vec<u8>>> {
        lock_files(&self.files)
    }
}

fn lock_files(files: &MemoryFiles) -> MutexGuard<'_, BTreeMap<(StreamKind, String), Vec<u8>>> {
    // A poisoned map still holds whatever was written before the panic.
    files
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl OutputSink for MemorySink {
    type Writer = MemoryWriter;

    fn create(&mut self, stream: StreamKind, file_name: &str) -> io::Result<Self::Writer> {
        let key = (stream, file_name.to_string());
        self.lock().insert(key.clone(), Vec::new());
        Ok(MemoryWriter {
            files: Arc::clone(&self.files),
            key,
        })
    }
}

/// Writer appending to one file of a [`MemorySink`].
#[derive(Debug)]
pub struct MemoryWriter {
    files: MemoryFiles,
    key: (StreamKind, String),
}

impl Write for MemoryWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut files = lock_files(&self.files);
        files.entry(self.key.clone()).or_default().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Both output streams of one category, opened and closed together.
///
/// Dropping the session releases both writers; [`CategoryOutput::close`]
/// additionally reports flush failures.
#[derive(Debug)]
pub struct CategoryOutput<W: Write> {
    events: W,
    snapshots: W,
}

impl<W: Write> CategoryOutput<W> {
    /// Open `{ordinal:02}_{category}` in both streams and write the headers.
    pub fn open<S>(sink: &mut S, ordinal: u32, category: &str) -> io::Result<Self>
    where
        S: OutputSink<Writer = W>,
    {
        let events = open_stream(sink, StreamKind::Events, ordinal, category)?;
        let snapshots = open_stream(sink, StreamKind::Snapshots, ordinal, category)?;
        Ok(Self { events, snapshots })
    }

    pub fn write(&mut self, stream: StreamKind, text: &str) -> io::Result<()> {
        let writer = match stream {
            StreamKind::Events => &mut self.events,
            StreamKind::Snapshots => &mut self.snapshots,
        };
        writer.write_all(text.as_bytes())
    }

    /// Flush both streams; the first failure is returned after both were tried.
    pub fn close(mut self) -> io::Result<()> {
        let events = self.events.flush();
        let snapshots = self.snapshots.flush();
        events.and(snapshots)
    }
}

/// File name shared by both streams of a category, minus the extension.
pub fn file_stem(ordinal: u32, category: &str) -> String {
    format!("{ordinal:02}_{category}")
}

fn open_stream<S: OutputSink>(
    sink: &mut S,
    stream: StreamKind,
    ordinal: u32,
    category: &str,
) -> io::Result<S::Writer> {
    let file_name = format!("{}.{}", file_stem(ordinal, category), stream.extension());
    let mut writer = sink.create(stream, &file_name)?;
    let comment = stream.comment_prefix();
    write!(writer, "{comment} Sample {category} data\n{comment} @generated")?;
    Ok(writer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_writes_headers_to_both_streams() {
        let mut sink = MemorySink::new();
        let output = CategoryOutput::open(&mut sink, 50, "airports").expect("open");
        output.close().expect("close");

        assert_eq!(sink.file_names(StreamKind::Events), vec!["50_airports.sql"]);
        assert_eq!(sink.file_names(StreamKind::Snapshots), vec!["50_airports.js"]);
        assert_eq!(
            sink.contents(StreamKind::Events, "50_airports.sql").as_deref(),
            Some("-- Sample airports data\n-- @generated")
        );
        assert_eq!(
            sink.contents(StreamKind::Snapshots, "50_airports.js").as_deref(),
            Some("// Sample airports data\n// @generated")
        );
    }

    #[test]
    fn streams_are_written_independently() {
        let mut sink = MemorySink::new();
        let mut output = CategoryOutput::open(&mut sink, 7, "meals").expect("open");
        output.write(StreamKind::Events, "\nevent").expect("write event");
        output.write(StreamKind::Snapshots, "\nsnapshot").expect("write snapshot");
        output.close().expect("close");

        let events = sink.contents(StreamKind::Events, "07_meals.sql").expect("events");
        let snapshots = sink.contents(StreamKind::Snapshots, "07_meals.js").expect("snapshots");
        assert!(events.ends_with("@generated\nevent"));
        assert!(snapshots.ends_with("@generated\nsnapshot"));
    }

    #[test]
    fn memory_writes_continue_after_a_panicked_holder() {
        let mut sink = MemorySink::new();
        let mut writer = sink.create(StreamKind::Events, "01_meals.sql").expect("create");
        writer.write_all(b"before").expect("write before");

        let files = Arc::clone(&sink.files);
        let holder = std::thread::spawn(move || {
            let _guard = files.lock().expect("lock files");
            panic!("writer thread failed while holding the lock");
        });
        assert!(holder.join().is_err());
        assert!(sink.files.is_poisoned());

        writer.write_all(b" after").expect("write after panic");
        assert_eq!(
            sink.contents(StreamKind::Events, "01_meals.sql").as_deref(),
            Some("before after")
        );
    }

    #[test]
    fn fs_sink_prepares_directories() {
        let root = std::env::temp_dir().join(format!("travelseed_sink_{}", uuid::Uuid::new_v4()));
        let options = GenerateOptions::default();
        let mut sink = FsSink::prepare(&root, &options).expect("prepare sink");

        let mut output = CategoryOutput::open(&mut sink, 51, "hotels").expect("open");
        output.write(StreamKind::Events, "\nx").expect("write");
        output.close().expect("close");

        let events =
            std::fs::read_to_string(root.join("sql").join("51_hotels.sql")).expect("read sql");
        assert_eq!(events, "-- Sample hotels data\n-- @generated\nx");
        assert!(root.join("mongo").join("51_hotels.js").is_file());

        std::fs::remove_dir_all(&root).ok();
    }
}
