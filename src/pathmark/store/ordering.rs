//! Position semantics shared by every reorder and move operation.
//!
//! An id is always taken out of its list first and then inserted before
//! position `index` of the list *as it stands after removal*:
//!
//! - `index >= len` appends.
//! - a negative index counts from the end of the shortened list, so `-1`
//!   lands before the last element (second-to-last), not at the end.
//! - a negative index reaching past the front clamps to the front.
//!
//! `[a, b, c, d]`, move `d` to `-1`: remove `d` -> `[a, b, c]`, insert at
//! `-1` -> `[a, b, d, c]`.

/// Resolves `index` against a list of length `len` into a concrete insertion point.
pub(crate) fn insertion_point(len: usize, index: isize) -> usize {
    if index < 0 {
        len.saturating_sub(index.unsigned_abs())
    } else {
        (index as usize).min(len)
    }
}

/// Inserts `id` into `list` using the semantics above.
pub(crate) fn insert_at(list: &mut Vec<String>, id: String, index: isize) {
    let at = insertion_point(list.len(), index);
    list.insert(at, id);
}

/// Removes every occurrence of `id`, returning whether anything was removed.
pub(crate) fn remove_id(list: &mut Vec<String>, id: &str) -> bool {
    let before = list.len();
    list.retain(|existing| existing != id);
    list.len() != before
}

/// Removes `id` and re-inserts it at `index`.
pub(crate) fn reposition(list: &mut Vec<String>, id: &str, index: isize) {
    remove_id(list, id);
    insert_at(list, id.to_string(), index);
}
