use once_cell::sync::Lazy;
use regex::Regex;
use std::fs::File;
use std::io::{self, BufRead, BufReader};

/// Lines that extend the previous entry: indented lines (stack frames
/// included), chained causes and elided-frame markers.
static RE_CONT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\s+|Caused by:|\.\.\. \d+ more)").unwrap()
});

#[derive(Debug, Clone, Copy, Default)]
pub struct ReadOpts {
    pub fold_continuations: bool,
    pub skip_blank: bool,
}

pub fn is_continuation(line: &str) -> bool {
    !line.is_empty() && RE_CONT.is_match(line)
}

/// Folds continuation lines into the entry that precedes them.
#[derive(Debug, Default)]
pub struct ContinuationFolder {
    buf: Option<String>,
}

impl ContinuationFolder {
    /// Feeds one line; returns the previous entry once a new one starts.
    pub fn push(&mut self, line: &str) -> Option<String> {
        match self.buf.as_mut() {
            Some(buf) if is_continuation(line) => {
                buf.push('\n');
                buf.push_str(line);
                None
            }
            _ => self.buf.replace(line.to_string()),
        }
    }

    pub fn finish(&mut self) -> Option<String> {
        self.buf.take()
    }
}

/// Reads entries from one source into `out`.
pub fn read_entries<R: BufRead>(reader: R, opts: &ReadOpts, out: &mut Vec<String>) -> io::Result<()> {
    let mut folder = ContinuationFolder::default();
    for line in reader.lines() {
        let l = line?;
        if opts.skip_blank && l.trim().is_empty() {
            continue;
        }
        if !opts.fold_continuations {
            out.push(l);
            continue;
        }
        if let Some(e) = folder.push(&l) {
            out.push(e);
        }
    }
    if let Some(e) = folder.finish() {
        out.push(e);
    }
    Ok(())
}

/// Reads every path in order (`-` is stdin). Entries never span two sources.
pub fn read_all_lines(paths: &[String], opts: &ReadOpts) -> io::Result<Vec<String>> {
    let mut out = Vec::new();
    for p in paths {
        if p == "-" {
            let stdin = io::stdin();
            read_entries(stdin.lock(), opts, &mut out)?;
        } else {
            let f = File::open(p)?;
            read_entries(BufReader::new(f), opts, &mut out)?;
        }
    }
    Ok(out)
}
