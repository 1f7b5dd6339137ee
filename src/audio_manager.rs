//! Shot sound effect. Audio is optional: a missing device or file only logs.
use std::{fs, io::Cursor, sync::Arc};

use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};
use tracing::{info, warn};

pub struct AudioManager {
    _stream: OutputStream,
    handle: OutputStreamHandle,
    shot: Option<Arc<Vec<u8>>>,
    volume: f32,
}

impl AudioManager {
    pub fn new() -> Option<Self> {
        match OutputStream::try_default() {
            Ok((_stream, handle)) => Some(Self {
                _stream,
                handle,
                shot: None,
                volume: 0.8,
            }),
            Err(e) => {
                warn!("No audio output available: {}", e);
                None
            }
        }
    }

    pub fn load_shot(&mut self, path: &str) {
        match fs::read(path) {
            Ok(bytes) => {
                info!(path, "Shot sound loaded");
                self.shot = Some(Arc::new(bytes));
            }
            Err(e) => warn!(path, "Shot sound unavailable: {}", e),
        }
    }

    /// Each shot gets its own detached sink so rapid fire overlaps.
    pub fn play_shot(&self) {
        let Some(data) = self.shot.clone() else {
            return;
        };
        if let Ok(dec) = Decoder::new(Cursor::new(data.as_ref().clone())) {
            if let Ok(sink) = Sink::try_new(&self.handle) {
                sink.append(dec.amplify(self.volume));
                sink.detach();
            }
        }
    }
}
