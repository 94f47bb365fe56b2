//! Speech backends.  Speaking is fire-and-forget: nothing in the
//! pipeline waits on it.

use std::process::Command;
use std::thread;

use sign_session::SpeechSink;

/// Logs what would have been spoken.  The default backend.
pub struct TracingSpeech;

impl SpeechSink for TracingSpeech {
    fn speak(&self, text: &str) {
        tracing::info!(text, "speak");
    }
}

/// Shells out to an external synthesiser (e.g. `espeak`, `say`),
/// passing the text as the single argument.  Failures are logged and
/// otherwise ignored.
pub struct CommandSpeech {
    program: String,
}

impl CommandSpeech {
    pub fn new(program: &str) -> Self {
        CommandSpeech { program: program.to_string() }
    }
}

impl SpeechSink for CommandSpeech {
    fn speak(&self, text: &str) {
        match Command::new(&self.program).arg(text).spawn() {
            Ok(mut child) => {
                // Reap in the background; the caller never blocks.
                thread::spawn(move || {
                    let _ = child.wait();
                });
            }
            Err(err) => tracing::warn!(program = %self.program, %err, "speech command failed"),
        }
    }
}

/// Pick a backend from the configured command string.
pub fn from_command(command: &str) -> Box<dyn SpeechSink> {
    if command.trim().is_empty() {
        Box::new(TracingSpeech)
    } else {
        Box::new(CommandSpeech::new(command.trim()))
    }
}
