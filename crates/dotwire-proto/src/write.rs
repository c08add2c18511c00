//! `WRITE` payload construction.
//!
//! A `WRITE` payload starts with a 32-bit flag word; each set flag appends
//! its field in a fixed order that BRLTTY relies on: display number,
//! region begin/size, text length + bytes, AND-mask, OR-mask, cursor,
//! charset length + bytes.
//!
//! Only the shapes produced by the client operations are constructible
//! here; in particular no constructor sets both attribute masks, whose
//! combined ordering the daemon side never exercises.

use bytes::{BufMut, Bytes};

use crate::packet::Packet;

/// A 32-bit display number follows.
pub const WF_DISPLAYNUMBER: u32 = 0x01;
/// A 32-bit region begin (1-based) and 32-bit region size follow.
pub const WF_REGION: u32 = 0x02;
/// A 32-bit byte length and that many text bytes follow.
pub const WF_TEXT: u32 = 0x04;
/// AND-mask attribute bytes follow.
pub const WF_ATTR_AND: u32 = 0x08;
/// OR-mask attribute bytes follow.
pub const WF_ATTR_OR: u32 = 0x10;
/// A 32-bit cursor cell (1-based, 0 = off) follows.
pub const WF_CURSOR: u32 = 0x20;
/// A 1-byte length and that many ASCII charset bytes follow.
pub const WF_CHARSET: u32 = 0x40;

/// Cursor cell of the write, 1-based on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cursor {
    /// Leave the cursor where it is; the cursor field is omitted.
    Leave,
    /// Switch the cursor off (wire value 0).
    Off,
    /// Place the cursor on the given cell (1-based).
    At(u32),
}

impl Cursor {
    /// Wire value of this cursor, `None` when the field is omitted.
    pub fn wire_value(self) -> Option<u32> {
        match self {
            Self::Leave => None,
            Self::Off => Some(0),
            Self::At(cell) => Some(cell),
        }
    }
}

/// A `WRITE` payload under construction.
///
/// Constructors cover the four operations the client exposes; `encode`
/// lays the present fields out in the mandated order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteRequest {
    display_number: Option<i32>,
    region: Option<(u32, u32)>,
    text: Option<Bytes>,
    and_mask: Option<Bytes>,
    or_mask: Option<Bytes>,
    cursor: Option<u32>,
    charset: Option<String>,
}

impl WriteRequest {
    /// Text write over the whole display.
    pub fn text(text: impl Into<Bytes>, cursor: Cursor, charset: &str) -> Self {
        Self {
            display_number: None,
            region: None,
            text: Some(text.into()),
            and_mask: None,
            or_mask: None,
            cursor: cursor.wire_value(),
            charset: Some(charset.to_string()),
        }
    }

    /// Raw dot patterns over the whole display.
    ///
    /// The text field is filled with spaces and the cells are applied as
    /// the OR-mask, so the dots come out regardless of the text
    /// translation table. Cells beyond `display_cells` are dropped, a
    /// short slice is padded with blank cells.
    pub fn dots(cells: &[u8], display_cells: usize) -> Self {
        let mut or_mask = vec![0u8; display_cells];
        let copied = cells.len().min(display_cells);
        or_mask[..copied].copy_from_slice(&cells[..copied]);

        Self {
            display_number: None,
            region: Some((1, display_cells as u32)),
            text: Some(vec![b' '; display_cells].into()),
            and_mask: None,
            or_mask: Some(or_mask.into()),
            cursor: Some(0),
            charset: None,
        }
    }

    /// Text write over a contiguous region starting at `begin` (1-based).
    pub fn region(text: impl Into<Bytes>, begin: u32, cursor: Cursor) -> Self {
        let text = text.into();
        Self {
            display_number: None,
            region: Some((begin, text.len() as u32)),
            text: Some(text),
            and_mask: None,
            or_mask: None,
            cursor: cursor.wire_value(),
            charset: None,
        }
    }

    /// Cursor repositioning without touching the cells.
    pub fn cursor(cell: u32) -> Self {
        Self {
            display_number: None,
            region: None,
            text: None,
            and_mask: None,
            or_mask: None,
            cursor: Some(cell),
            charset: None,
        }
    }

    /// The flag word describing which fields are present.
    pub fn flags(&self) -> u32 {
        let mut flags = 0;
        if self.display_number.is_some() {
            flags |= WF_DISPLAYNUMBER;
        }
        if self.region.is_some() {
            flags |= WF_REGION;
        }
        if self.text.is_some() {
            flags |= WF_TEXT;
        }
        if self.and_mask.is_some() {
            flags |= WF_ATTR_AND;
        }
        if self.or_mask.is_some() {
            flags |= WF_ATTR_OR;
        }
        if self.cursor.is_some() {
            flags |= WF_CURSOR;
        }
        if self.charset.is_some() {
            flags |= WF_CHARSET;
        }
        flags
    }

    /// Lay the payload out in wire order.
    pub fn encode(&self, dst: &mut impl BufMut) {
        dst.put_u32(self.flags());
        if let Some(display) = self.display_number {
            dst.put_i32(display);
        }
        if let Some((begin, size)) = self.region {
            dst.put_u32(begin);
            dst.put_u32(size);
        }
        if let Some(text) = &self.text {
            dst.put_u32(text.len() as u32);
            dst.put_slice(text);
        }
        if let Some(mask) = &self.and_mask {
            dst.put_slice(mask);
        }
        if let Some(mask) = &self.or_mask {
            dst.put_slice(mask);
        }
        if let Some(cursor) = self.cursor {
            dst.put_u32(cursor);
        }
        if let Some(charset) = &self.charset {
            dst.put_u8(charset.len() as u8);
            dst.put_slice(charset.as_bytes());
        }
    }

    /// Finish into a [`Packet::Write`].
    pub fn into_packet(self) -> Packet {
        let mut payload = Vec::new();
        self.encode(&mut payload);
        Packet::Write { payload: payload.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(request: &WriteRequest) -> Vec<u8> {
        let mut buf = Vec::new();
        request.encode(&mut buf);
        buf
    }

    #[test]
    fn text_write_layout() {
        let request = WriteRequest::text(&b"hi"[..], Cursor::At(1), "UTF-8");
        assert_eq!(request.flags(), WF_TEXT | WF_CURSOR | WF_CHARSET);
        assert_eq!(
            payload(&request),
            [
                &(WF_TEXT | WF_CURSOR | WF_CHARSET).to_be_bytes()[..],
                &2u32.to_be_bytes()[..],
                &b"hi"[..],
                &1u32.to_be_bytes()[..],
                &[5u8][..],
                &b"UTF-8"[..],
            ]
            .concat()
        );
    }

    #[test]
    fn text_write_leave_cursor_omits_field() {
        let request = WriteRequest::text(&b"hi"[..], Cursor::Leave, "UTF-8");
        assert_eq!(request.flags(), WF_TEXT | WF_CHARSET);
    }

    #[test]
    fn dots_layout_matches_wire_expectation() {
        // 40-cell display, every dot raised.
        let request = WriteRequest::dots(&[0xFF; 40], 40);
        assert_eq!(request.flags(), WF_REGION | WF_TEXT | WF_CURSOR | WF_ATTR_OR);

        let mut expected = Vec::new();
        expected.extend_from_slice(&(WF_REGION | WF_TEXT | WF_CURSOR | WF_ATTR_OR).to_be_bytes());
        expected.extend_from_slice(&1u32.to_be_bytes());
        expected.extend_from_slice(&40u32.to_be_bytes());
        expected.extend_from_slice(&40u32.to_be_bytes());
        expected.extend_from_slice(&[b' '; 40]);
        expected.extend_from_slice(&[0xFF; 40]);
        expected.extend_from_slice(&0u32.to_be_bytes());
        assert_eq!(payload(&request), expected);
    }

    #[test]
    fn dots_pads_and_truncates_to_display_size() {
        let short = WriteRequest::dots(&[0xFF; 2], 4);
        let body = payload(&short);
        // or-mask sits between the 4 text spaces and the cursor word
        let mask = &body[body.len() - 8..body.len() - 4];
        assert_eq!(mask, [0xFF, 0xFF, 0, 0]);

        let long = WriteRequest::dots(&[0xAA; 8], 4);
        let body = payload(&long);
        let mask = &body[body.len() - 8..body.len() - 4];
        assert_eq!(mask, [0xAA; 4]);
    }

    #[test]
    fn region_layout() {
        let request = WriteRequest::region(&b"abc"[..], 5, Cursor::Off);
        assert_eq!(request.flags(), WF_REGION | WF_TEXT | WF_CURSOR);
        assert_eq!(
            payload(&request),
            [
                &(WF_REGION | WF_TEXT | WF_CURSOR).to_be_bytes()[..],
                &5u32.to_be_bytes()[..],
                &3u32.to_be_bytes()[..],
                &3u32.to_be_bytes()[..],
                &b"abc"[..],
                &0u32.to_be_bytes()[..],
            ]
            .concat()
        );
    }

    #[test]
    fn cursor_only_layout() {
        let request = WriteRequest::cursor(7);
        assert_eq!(
            payload(&request),
            [&WF_CURSOR.to_be_bytes()[..], &7u32.to_be_bytes()[..]].concat()
        );
    }
}
