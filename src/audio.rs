use std::fs::File;
use std::io::BufReader;

use rodio::{Decoder, OutputStream, Sink};

/// The music file is looked up relative to the working directory.
pub const MUSIC_PATH: &str = "background_music.wav";

/// Background music, queued once at startup. Playback is fire-and-forget
/// and never synchronized with gameplay; dropping the `Jukebox` stops it.
///
/// Every failure along the chain (missing file, no output device,
/// undecodable data) is non-fatal: the game runs in silence.
pub struct Jukebox {
    // Held only to keep the device and queued buffer alive.
    _stream: OutputStream,
    _sink: Sink,
}

impl Jukebox {
    pub fn start(path: &str) -> Option<Self> {
        let file = match File::open(path) {
            Ok(f) => f,
            Err(e) => {
                eprintln!("[WARN] Could not open {path}: {e}. Playing without music.");
                return None;
            }
        };

        let (stream, handle) = match OutputStream::try_default() {
            Ok(pair) => pair,
            Err(e) => {
                eprintln!("[WARN] No audio output device: {e}. Playing without music.");
                return None;
            }
        };

        let sink = match Sink::try_new(&handle) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("[WARN] Could not open an audio sink: {e}. Playing without music.");
                return None;
            }
        };

        let source = match Decoder::new(BufReader::new(file)) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("[WARN] Could not decode {path}: {e}. Playing without music.");
                return None;
            }
        };

        sink.append(source);
        Some(Jukebox {
            _stream: stream,
            _sink: sink,
        })
    }
}
