use alloc::vec::Vec;

/// Colour map accumulated from every CMAP chunk, in file order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Palette {
    bytes: Vec<u8>,
}

impl Palette {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one CMAP payload.
    pub(crate) fn extend(&mut self, cmap: &[u8]) {
        self.bytes.extend_from_slice(cmap);
    }

    /// Number of complete RGB entries. A trailing partial triple is ignored.
    pub fn len(&self) -> usize {
        self.bytes.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, index: usize) -> Option<[u8; 3]> {
        let start = index.checked_mul(3)?;
        let rgb = self.bytes.get(start..start.checked_add(3)?)?;
        Some([rgb[0], rgb[1], rgb[2]])
    }

    pub fn iter(&self) -> impl Iterator<Item = [u8; 3]> + '_ {
        self.as_bytes()
            .chunks_exact(3)
            .map(|c| [c[0], c[1], c[2]])
    }

    /// Complete entries as packed RGB bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len() * 3]
    }

    #[cfg(feature = "rgb")]
    pub fn as_rgb(&self) -> &[rgb::RGB8] {
        use rgb::FromSlice as _;
        self.as_bytes().as_rgb()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn concatenates_in_order_and_drops_partial_entry() {
        let mut pal = Palette::new();
        assert!(pal.is_empty());
        pal.extend(&[1, 2, 3, 4]);
        pal.extend(&[5, 6, 7]);
        assert_eq!(pal.len(), 2);
        assert_eq!(pal.get(0), Some([1, 2, 3]));
        assert_eq!(pal.get(1), Some([4, 5, 6]));
        assert_eq!(pal.get(2), None);
        assert_eq!(pal.get(usize::MAX), None);
        assert_eq!(pal.as_bytes(), &[1, 2, 3, 4, 5, 6]);
        assert_eq!(pal.iter().count(), 2);
    }
}
