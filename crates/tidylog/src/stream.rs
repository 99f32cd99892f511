use std::io::{self, BufRead, Write};

use crate::dispatch::Dispatcher;

/// Drive the dispatcher over a line-oriented byte stream until end of
/// input.
///
/// One line is fully processed (detect, parse, render, write) before the
/// next is read. Trailing `\n` / `\r\n` is stripped before dispatch and a
/// single `\n` is written after each record. I/O errors are the only
/// fatal condition and are propagated to the caller.
pub fn run<R: BufRead, W: Write>(
    mut input: R,
    mut output: W,
    dispatcher: &mut Dispatcher,
) -> io::Result<()> {
    let mut buf = Vec::with_capacity(1024);
    loop {
        buf.clear();
        if input.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        if buf.last() == Some(&b'\n') {
            buf.pop();
            if buf.last() == Some(&b'\r') {
                buf.pop();
            }
        }

        let rendered = dispatcher.process(&buf);
        output.write_all(&rendered)?;
        output.write_all(b"\n")?;
    }
    output.flush()
}
