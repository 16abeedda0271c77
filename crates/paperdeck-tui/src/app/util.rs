use std::io::Write;

/// Copy text to the system clipboard using the OSC 52 terminal escape sequence.
pub(super) fn osc52_copy(text: &str) {
    use base64::Engine;
    let encoded = base64::engine::general_purpose::STANDARD.encode(text.as_bytes());
    // Write directly to stdout, bypassing the terminal backend buffer
    let mut stdout = std::io::stdout();
    let _ = stdout.write_all(format!("\x1b]52;c;{encoded}\x07").as_bytes());
    let _ = stdout.flush();
}
