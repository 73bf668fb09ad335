use flate2::read::GzDecoder;
use std::{
    error::Error,
    ffi::OsStr,
    fs::File,
    io::{self, BufRead, BufReader},
    path::Path,
};

pub fn is_compressed<P: AsRef<Path>>(p: &P) -> bool {
    p.as_ref().extension() == Some(OsStr::new("gz"))
}

/// Open `p` for line reading, decompressing `.gz` files. `-` reads stdin.
pub fn read_with_gz<P: AsRef<Path>>(p: &P) -> Result<Box<dyn BufRead>, Box<dyn Error>> {
    if p.as_ref() == Path::new("-") {
        return Ok(Box::new(BufReader::new(io::stdin())));
    }

    let file = File::open(p)?;
    if is_compressed(p) {
        debug!("reading gzip input {}", p.as_ref().display());
        Ok(Box::new(BufReader::new(GzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Collects one expression per line, skipping blank and comment lines.
#[must_use]
pub struct ExprReader<R: BufRead> {
    reader: R,
    comment: char,
}

impl<R: BufRead> ExprReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            comment: '#',
        }
    }

    pub fn with_comment(mut self, comment: char) -> Self {
        self.comment = comment;
        self
    }

    pub fn finish(self) -> Result<Vec<String>, Box<dyn Error>> {
        let mut exprs = vec![];

        for line in self.reader.lines() {
            let line = line?;
            let line = line.trim();

            if line.is_empty() || line.starts_with(self.comment) {
                continue;
            }

            exprs.push(line.to_string());
        }

        debug!("read {} expressions", exprs.len());
        Ok(exprs)
    }
}
