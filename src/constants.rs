/// Bucket count of a freshly created object table.
pub const INITIAL_CAPACITY: usize = 41;

/// `len / capacity` ratio above which a table expands before inserting.
pub const LOAD_FACTOR: f64 = 0.5;

pub const GROWTH_FACTOR: usize = 2;

#[inline]
pub fn is_json_whitespace(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\r' | '\n')
}
