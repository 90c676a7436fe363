//! Decoder for MATLAB Level 4 (`.mat` v4) containers.
//!
//! A v4 file is a plain sequence of matrices. Each starts with a 20-byte
//! header of five `i32` words:
//!
//! | word   | meaning                                           |
//! |--------|---------------------------------------------------|
//! | type   | `M*1000 + O*100 + P*10 + T`                       |
//! | mrows  | row count                                         |
//! | ncols  | column count                                      |
//! | imagf  | 1 if an imaginary part follows                    |
//! | namlen | name length in bytes, including the trailing NUL  |
//!
//! `M` selects byte order (0 little-endian, 1 big-endian), `P` the element
//! type and `T` numeric (0), text (1) or sparse (2). Elements are stored
//! column by column.

use std::path::Path;

use crate::error::IoError;

const HEADER_LEN: usize = 20;

/// Whether a matrix holds numbers or character codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MatKind {
    Numeric,
    Text,
}

/// One decoded matrix, converted to row-major order.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct MatEntry {
    pub name: String,
    pub rows: usize,
    pub cols: usize,
    pub kind: MatKind,
    pub data: Vec<f64>,
}

impl MatEntry {
    /// Reads each row of a text matrix as a string, trimming trailing
    /// blanks and NULs.
    pub fn text_rows(&self) -> Vec<String> {
        (0..self.rows)
            .map(|r| chars_to_string(self.data[r * self.cols..(r + 1) * self.cols].iter().copied()))
            .collect()
    }

    /// Reads each column of a text matrix as a string.
    pub fn text_columns(&self) -> Vec<String> {
        (0..self.cols)
            .map(|c| chars_to_string((0..self.rows).map(|r| self.data[r * self.cols + c])))
            .collect()
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.cols + col]
    }
}

fn chars_to_string(codes: impl Iterator<Item = f64>) -> String {
    let s: String = codes
        .map(|c| char::from_u32(c as u32).unwrap_or('\u{fffd}'))
        .collect();
    s.trim_end_matches(['\0', ' ']).to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ByteOrder {
    Little,
    Big,
}

impl ByteOrder {
    fn i32(self, b: [u8; 4]) -> i32 {
        match self {
            Self::Little => i32::from_le_bytes(b),
            Self::Big => i32::from_be_bytes(b),
        }
    }
}

/// Element precision, the `P` digit of the type word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Precision {
    F64,
    F32,
    I32,
    I16,
    U16,
    U8,
}

impl Precision {
    fn from_digit(p: i32) -> Option<Self> {
        Some(match p {
            0 => Self::F64,
            1 => Self::F32,
            2 => Self::I32,
            3 => Self::I16,
            4 => Self::U16,
            5 => Self::U8,
            _ => return None,
        })
    }

    fn size(self) -> usize {
        match self {
            Self::F64 => 8,
            Self::F32 | Self::I32 => 4,
            Self::I16 | Self::U16 => 2,
            Self::U8 => 1,
        }
    }

    fn decode(self, order: ByteOrder, b: &[u8]) -> f64 {
        macro_rules! num {
            ($t:ty, $n:literal) => {{
                let mut buf = [0u8; $n];
                buf.copy_from_slice(b);
                match order {
                    ByteOrder::Little => <$t>::from_le_bytes(buf),
                    ByteOrder::Big => <$t>::from_be_bytes(buf),
                }
            }};
        }
        match self {
            Self::F64 => num!(f64, 8),
            Self::F32 => f64::from(num!(f32, 4)),
            Self::I32 => f64::from(num!(i32, 4)),
            Self::I16 => f64::from(num!(i16, 2)),
            Self::U16 => f64::from(num!(u16, 2)),
            Self::U8 => f64::from(b[0]),
        }
    }
}

/// Reads and decodes every matrix in the file at `path`.
///
/// # Errors
///
/// Returns [`IoError::FileNotFound`], [`IoError::Read`] or
/// [`IoError::Format`].
pub(crate) fn read_file(path: &Path) -> Result<Vec<MatEntry>, IoError> {
    if !path.exists() {
        return Err(IoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let bytes = std::fs::read(path).map_err(|e| IoError::Read {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    decode(&bytes).map_err(|reason| IoError::Format {
        format: "MAT v4",
        path: path.to_path_buf(),
        reason,
    })
}

/// Decodes a whole v4 byte stream.
pub(crate) fn decode(bytes: &[u8]) -> Result<Vec<MatEntry>, String> {
    let mut entries = Vec::new();
    let mut pos = 0;
    while pos < bytes.len() {
        let (entry, next) = decode_one(bytes, pos)?;
        entries.push(entry);
        pos = next;
    }
    Ok(entries)
}

fn word(bytes: &[u8], at: usize) -> [u8; 4] {
    [bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]]
}

/// Picks the byte order under which the type word is well formed.
fn detect_order(type_word: [u8; 4]) -> Option<(ByteOrder, i32)> {
    for (order, machine) in [(ByteOrder::Little, 0), (ByteOrder::Big, 1)] {
        let v = order.i32(type_word);
        if (0..10_000).contains(&v) && v / 1000 == machine {
            return Some((order, v));
        }
    }
    None
}

fn decode_one(bytes: &[u8], start: usize) -> Result<(MatEntry, usize), String> {
    if bytes.len() - start < HEADER_LEN {
        return Err(format!("truncated header at byte {start}"));
    }
    let (order, type_word) = detect_order(word(bytes, start))
        .ok_or_else(|| format!("unsupported type word at byte {start}"))?;
    let o = (type_word / 100) % 10;
    let p = (type_word / 10) % 10;
    let t = type_word % 10;
    if o != 0 {
        return Err(format!("reserved digit is {o} at byte {start}"));
    }
    let precision =
        Precision::from_digit(p).ok_or_else(|| format!("unknown precision {p} at byte {start}"))?;
    let kind = match t {
        0 => MatKind::Numeric,
        1 => MatKind::Text,
        2 => return Err(format!("sparse matrix at byte {start} is not supported")),
        _ => return Err(format!("unknown matrix type {t} at byte {start}")),
    };

    let field = |i: usize| -> Result<usize, String> {
        let v = order.i32(word(bytes, start + 4 * i));
        usize::try_from(v).map_err(|_| format!("negative header field {v} at byte {start}"))
    };
    let rows = field(1)?;
    let cols = field(2)?;
    let imagf = field(3)?;
    let namlen = field(4)?;
    if imagf != 0 {
        return Err(format!("complex matrix at byte {start} is not supported"));
    }

    let name_start = start + HEADER_LEN;
    let name_end = name_start
        .checked_add(namlen)
        .filter(|&e| e <= bytes.len())
        .ok_or_else(|| format!("truncated name at byte {name_start}"))?;
    let name_bytes = &bytes[name_start..name_end];
    let name_bytes = name_bytes.split(|&b| b == 0).next().unwrap_or_default();
    let name = String::from_utf8_lossy(name_bytes).into_owned();

    let count = rows
        .checked_mul(cols)
        .ok_or_else(|| format!("matrix '{name}' is too large"))?;
    let data_len = count
        .checked_mul(precision.size())
        .ok_or_else(|| format!("matrix '{name}' is too large"))?;
    let data_end = name_end
        .checked_add(data_len)
        .filter(|&e| e <= bytes.len())
        .ok_or_else(|| format!("truncated data for matrix '{name}'"))?;

    // Column-major on disk, row-major in memory.
    let size = precision.size();
    let mut data = vec![0.0; count];
    for c in 0..cols {
        for r in 0..rows {
            let at = name_end + (c * rows + r) * size;
            data[r * cols + c] = precision.decode(order, &bytes[at..at + size]);
        }
    }

    Ok((
        MatEntry {
            name,
            rows,
            cols,
            kind,
            data,
        },
        data_end,
    ))
}

/// Encodes matrices as a little- or big-endian v4 stream of `f64` (or
/// `u8` text) elements.
#[cfg(test)]
pub(crate) fn encode(entries: &[MatEntry], big_endian: bool) -> Vec<u8> {
    let mut out = Vec::new();
    for e in entries {
        let machine = if big_endian { 1000 } else { 0 };
        let (p, t) = match e.kind {
            MatKind::Numeric => (0, 0),
            MatKind::Text => (5, 1),
        };
        let header = [
            machine + p * 10 + t,
            e.rows as i32,
            e.cols as i32,
            0,
            e.name.len() as i32 + 1,
        ];
        for w in header {
            out.extend(if big_endian { w.to_be_bytes() } else { w.to_le_bytes() });
        }
        out.extend(e.name.as_bytes());
        out.push(0);
        for c in 0..e.cols {
            for r in 0..e.rows {
                let v = e.data[r * e.cols + c];
                match e.kind {
                    MatKind::Numeric => {
                        out.extend(if big_endian { v.to_be_bytes() } else { v.to_le_bytes() })
                    }
                    MatKind::Text => out.push(v as u8),
                }
            }
        }
    }
    out
}

#[cfg(test)]
pub(crate) fn text_entry(name: &str, rows: &[&str]) -> MatEntry {
    let cols = rows.iter().map(|r| r.len()).max().unwrap_or(0);
    let mut data = Vec::with_capacity(rows.len() * cols);
    for r in rows {
        let mut padded: Vec<f64> = r.bytes().map(f64::from).collect();
        padded.resize(cols, f64::from(b' '));
        data.extend(padded);
    }
    MatEntry {
        name: name.to_string(),
        rows: rows.len(),
        cols,
        kind: MatKind::Text,
        data,
    }
}
