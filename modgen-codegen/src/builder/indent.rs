//! Indentation configuration for code generation.

/// Indentation width for generated code, in spaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Indent(u8);

impl Indent {
    /// 2-space indentation (TypeScript, TSX).
    pub const TYPESCRIPT: Self = Self(2);

    /// Append `level` indent units to `buffer`.
    pub fn write(&self, buffer: &mut String, level: usize) {
        let width = usize::from(self.0) * level;
        buffer.extend(std::iter::repeat_n(' ', width));
    }
}
