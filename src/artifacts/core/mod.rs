//! Shared output utilities
//!
//! Long command output (`log`, `global-log`) goes through the `minus` pager when
//! stdout is a terminal and `NO_PAGER` is unset; otherwise it is written straight to
//! stdout so that scripts and tests see plain text.

use crate::config::pager_enabled;
use derive_new::new;
use minus::Pager;
use std::fmt::Display;
use std::io::{self, Write};

/// Wrapper that implements `Write` for the minus pager
///
/// The minus pager doesn't implement `std::io::Write` directly, so this wrapper
/// adapts it to be usable wherever a writer is expected.
#[derive(new)]
pub struct PagerWriter {
    pager: Pager,
}

impl PagerWriter {
    pub fn pager(&self) -> &Pager {
        &self.pager
    }
}

impl Write for PagerWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let s =
            std::str::from_utf8(buf).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        self.pager.push_str(s).map_err(io::Error::other)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Write every item, paging the result when the pager is enabled
pub fn page_output<I, T>(items: I) -> anyhow::Result<()>
where
    I: IntoIterator<Item = T>,
    T: Display,
{
    if pager_enabled() {
        let mut writer = PagerWriter::new(Pager::new());
        write_all(&mut writer, items)?;
        minus::page_all(writer.pager().clone())?;
    } else {
        let stdout = io::stdout();
        let mut writer = stdout.lock();
        write_all(&mut writer, items)?;
        writer.flush()?;
    }

    Ok(())
}

fn write_all<W, I, T>(writer: &mut W, items: I) -> anyhow::Result<()>
where
    W: Write,
    I: IntoIterator<Item = T>,
    T: Display,
{
    for item in items {
        write!(writer, "{item}")?;
    }

    Ok(())
}
