use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, SyncSender};
use std::thread::{self, JoinHandle};

use anyhow::{anyhow, Context, Result};
use tracing::{debug, warn};

use ferrite_backprop::{ChannelObserver, Snapshot};

use crate::frames::FrameRenderer;

/// Writes frames on a background thread so the training loop only ever
/// pays for a `try_send`.
///
/// Snapshots are queued in a bounded channel; the worker renders each one to
/// `dir/{iteration:06}.png`. A frame that fails to save is logged and
/// skipped.
pub struct FrameSink {
    tx: SyncSender<Snapshot>,
    worker: JoinHandle<usize>,
    dir: PathBuf,
}

impl FrameSink {
    /// Creates `dir` (and parents) and starts the writer thread.
    pub fn spawn(renderer: FrameRenderer, dir: PathBuf, capacity: usize) -> Result<FrameSink> {
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("creating frame directory {}", dir.display()))?;

        let (tx, rx) = mpsc::sync_channel(capacity);
        let worker_dir = dir.clone();
        let worker = thread::Builder::new()
            .name("frame-writer".into())
            .spawn(move || write_frames(renderer, worker_dir, rx))
            .context("starting frame writer thread")?;

        Ok(FrameSink { tx, worker, dir })
    }

    /// A non-blocking observer feeding this sink.
    pub fn observer(&self) -> ChannelObserver {
        ChannelObserver::new(self.tx.clone())
    }

    pub fn dir(&self) -> &PathBuf {
        &self.dir
    }

    /// Closes the queue, waits for pending frames and returns how many were
    /// written. Observers handed out earlier must be dropped first or this
    /// blocks until they are.
    pub fn finish(self) -> Result<usize> {
        let FrameSink { tx, worker, .. } = self;
        drop(tx);
        worker.join().map_err(|_| anyhow!("frame writer thread panicked"))
    }
}

fn write_frames(renderer: FrameRenderer, dir: PathBuf, rx: Receiver<Snapshot>) -> usize {
    let mut written = 0;
    for snapshot in rx {
        match renderer.save(&snapshot, &dir) {
            Ok(path) => {
                written += 1;
                debug!(path = %path.display(), sse = snapshot.sse, "frame written");
            }
            Err(e) => warn!(iteration = snapshot.iteration, error = %e, "failed to write frame"),
        }
    }
    written
}

#[cfg(test)]
mod tests {
    use super::*;
    use ferrite_backprop::{Observer, Topology};

    #[test]
    fn writes_every_queued_frame() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("nested").join("frames");
        let topology = Topology::new(2, 2, 1).unwrap().with_sentinel();
        let sink = FrameSink::spawn(FrameRenderer::new(topology, 50), out.clone(), 16).unwrap();

        {
            let mut observer = sink.observer();
            for iteration in [0, 101, 202] {
                observer.observe(Snapshot {
                    iteration,
                    values: vec![0.5; topology.node_count()],
                    sse: 0.25,
                });
            }
            assert_eq!(observer.dropped(), 0);
        }

        assert_eq!(sink.finish().unwrap(), 3);
        for name in ["000000.png", "000101.png", "000202.png"] {
            assert!(out.join(name).is_file(), "{name} missing");
        }
    }
}
