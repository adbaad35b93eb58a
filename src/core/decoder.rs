//! Background photo decoding.
//!
//! Reading a camera JPEG and scaling it down takes long enough to stutter
//! the UI, so submissions with a photo are handed to a small pool of named
//! worker threads. Results come back through a channel and are drained on
//! the UI thread with [`PhotoDecoder::poll`]; the entry is only created and
//! appended once its photo is ready.
//!
//! Jobs are never cancelled. Dropping the decoder closes the job channel,
//! which lets idle workers exit, and waits briefly for busy ones.

use std::panic::AssertUnwindSafe;
use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, SendError, Sender, unbounded};
use log::{trace, warn};

use crate::entities::{EntryDraft, Photo, PhotoError, Viewport};

/// Everything needed to build the entry once the photo is decoded.
#[derive(Debug, Clone)]
pub struct DecodeTicket {
    pub draft: EntryDraft,
    pub viewport: Viewport,
    pub path: PathBuf,
}

#[derive(Debug)]
pub struct DecodeOutcome {
    pub ticket: DecodeTicket,
    pub photo: Result<Photo, PhotoError>,
}

pub struct PhotoDecoder {
    jobs: Option<Sender<DecodeTicket>>,
    results: Receiver<DecodeOutcome>,
    handles: Vec<thread::JoinHandle<()>>,
    in_flight: usize,
}

impl PhotoDecoder {
    /// Spawn `num_threads` decode workers (at least one).
    pub fn new(num_threads: usize) -> std::io::Result<Self> {
        let (job_tx, job_rx) = unbounded::<DecodeTicket>();
        let (result_tx, result_rx) = unbounded::<DecodeOutcome>();

        let mut handles = Vec::new();
        for worker_id in 0..num_threads.max(1) {
            let job_rx = job_rx.clone();
            let result_tx = result_tx.clone();
            let handle = thread::Builder::new()
                .name(format!("guestbook-decode-{}", worker_id))
                .spawn(move || {
                    trace!("Decode worker {} started", worker_id);
                    // recv() errors once every sender is gone
                    while let Ok(ticket) = job_rx.recv() {
                        let photo = decode_guarded(|| Photo::decode_file(&ticket.path));
                        if result_tx.send(DecodeOutcome { ticket, photo }).is_err() {
                            break;
                        }
                    }
                    trace!("Decode worker {} stopped", worker_id);
                })?;
            handles.push(handle);
        }

        trace!("PhotoDecoder initialized: {} threads", handles.len());

        Ok(Self {
            jobs: Some(job_tx),
            results: result_rx,
            handles,
            in_flight: 0,
        })
    }

    /// Queue a photo for decoding.
    ///
    /// Hands the ticket back when no worker can take it, so the caller can
    /// decode it some other way instead of losing the submission.
    pub fn submit(&mut self, ticket: DecodeTicket) -> Result<(), DecodeTicket> {
        let Some(jobs) = &self.jobs else {
            return Err(ticket);
        };
        trace!("Queued photo decode: {}", ticket.path.display());
        match jobs.send(ticket) {
            Ok(()) => {
                self.in_flight += 1;
                Ok(())
            }
            Err(SendError(ticket)) => {
                warn!("Photo decode workers are gone: {}", ticket.path.display());
                Err(ticket)
            }
        }
    }

    /// Drain finished decodes without blocking.
    pub fn poll(&mut self) -> Vec<DecodeOutcome> {
        let done: Vec<DecodeOutcome> = self.results.try_iter().collect();
        self.in_flight = self.in_flight.saturating_sub(done.len());
        done
    }

    /// Submissions still waiting for their photo.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    pub fn num_threads(&self) -> usize {
        self.handles.len()
    }
}

/// Run a decode, turning a panic inside the image codecs into an error.
fn decode_guarded<F>(decode: F) -> Result<Photo, PhotoError>
where
    F: FnOnce() -> Result<Photo, PhotoError>,
{
    std::panic::catch_unwind(AssertUnwindSafe(decode)).unwrap_or_else(|_| {
        warn!("Photo decoder panicked");
        Err(PhotoError::Decode("decoder panicked".to_string()))
    })
}

impl Drop for PhotoDecoder {
    fn drop(&mut self) {
        self.jobs = None;

        let deadline = Instant::now() + Duration::from_millis(500);
        for handle in std::mem::take(&mut self.handles) {
            while !handle.is_finished() {
                if Instant::now() >= deadline {
                    trace!("Decode shutdown timeout reached, leaving workers behind");
                    return;
                }
                thread::sleep(Duration::from_millis(1));
            }
            let _ = handle.join();
        }
        trace!("All decode workers stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn poll_until(decoder: &mut PhotoDecoder, want: usize) -> Vec<DecodeOutcome> {
        let deadline = Instant::now() + Duration::from_secs(5);
        let mut out = Vec::new();
        while out.len() < want && Instant::now() < deadline {
            out.extend(decoder.poll());
            thread::sleep(Duration::from_millis(5));
        }
        out
    }

    fn ticket(path: PathBuf, name: &str) -> DecodeTicket {
        DecodeTicket {
            draft: EntryDraft::new(name, "hello"),
            viewport: Viewport::new(800.0, 600.0),
            path,
        }
    }

    #[test]
    fn test_decode_roundtrip_through_workers() {
        let path = std::env::temp_dir().join(format!("guestbook_decoder_{}.png", std::process::id()));
        let img = image::RgbaImage::from_pixel(3, 2, image::Rgba([1, 2, 3, 255]));
        let mut bytes = Cursor::new(Vec::new());
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut bytes, image::ImageFormat::Png)
            .unwrap();
        std::fs::write(&path, bytes.into_inner()).unwrap();

        let mut decoder = PhotoDecoder::new(2).unwrap();
        decoder.submit(ticket(path.clone(), "Jin")).unwrap();
        assert_eq!(decoder.in_flight(), 1);

        let done = poll_until(&mut decoder, 1);
        assert_eq!(done.len(), 1);
        assert_eq!(done[0].ticket.draft.name, "Jin");
        let photo = done[0].photo.as_ref().unwrap();
        assert_eq!((photo.width(), photo.height()), (3, 2));
        assert_eq!(decoder.in_flight(), 0);

        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_missing_file_reports_error() {
        let mut decoder = PhotoDecoder::new(1).unwrap();
        decoder
            .submit(ticket(PathBuf::from("/nonexistent/guestbook.jpg"), "Ghost"))
            .unwrap();

        let done = poll_until(&mut decoder, 1);
        assert_eq!(done.len(), 1);
        assert!(matches!(done[0].photo, Err(PhotoError::Io(_))));
    }

    #[test]
    fn test_zero_threads_still_spawns_one() {
        let decoder = PhotoDecoder::new(0).unwrap();
        assert_eq!(decoder.num_threads(), 1);
    }

    #[test]
    fn test_closed_queue_returns_ticket() {
        let mut decoder = PhotoDecoder::new(1).unwrap();
        decoder.jobs = None;

        let back = decoder
            .submit(ticket(PathBuf::from("kept.jpg"), "Dae"))
            .unwrap_err();
        assert_eq!(back.draft.name, "Dae");
        assert_eq!(back.path, PathBuf::from("kept.jpg"));
        assert_eq!(decoder.in_flight(), 0);
    }

    #[test]
    fn test_panicking_decode_becomes_error() {
        let result = decode_guarded(|| panic!("corrupt huffman table"));
        assert!(matches!(result, Err(PhotoError::Decode(_))));
    }
}
