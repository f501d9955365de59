// The MIT License (MIT)

// Copyright (c) 2015 Rustcc developers

// Permission is hereby granted, free of charge, to any person obtaining a copy of
// this software and associated documentation files (the "Software"), to deal in
// the Software without restriction, including without limitation the rights to
// use, copy, modify, merge, publish, distribute, sublicense, and/or sell copies of
// the Software, and to permit persons to whom the Software is furnished to do so,
// subject to the following conditions:

// The above copyright notice and this permission notice shall be included in all
// copies or substantial portions of the Software.

// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY, FITNESS
// FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR
// COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER
// IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN
// CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Input file parsing: token counting for allocation sizing, then the real
//! parse pass.

use std::path::Path;

use crate::error::CoreError;

/// Counts whitespace-delimited tokens the way the original sizing pass did:
/// literal `' '` characters plus one, for any non-empty buffer. This is
/// deliberately narrower than the general-whitespace split `parse_into`
/// actually uses; see DESIGN.md decision 2. A file containing only other
/// whitespace (tabs, newlines) will under-count here, which `parse_into`
/// turns into a `CoreError::Parse` instead of writing past the allocation.
pub fn count_tokens(buf: &[u8]) -> usize {
    if buf.iter().all(u8::is_ascii_whitespace) {
        return 0;
    }
    buf.iter().filter(|&&b| b == b' ').count() + 1
}

/// Parses `buf` as whitespace-separated signed decimal integers into a
/// freshly allocated vector, failing if the number of tokens found differs
/// from `expected_count` (the result of `count_tokens`) or if any token is
/// not a valid `i32`.
pub fn parse_into(path: &Path, buf: &[u8], expected_count: usize) -> Result<Vec<i32>, CoreError> {
    let text = std::str::from_utf8(buf).map_err(|e| CoreError::Parse {
        path: path.to_path_buf(),
        reason: format!("input is not valid UTF-8: {}", e),
    })?;

    let mut values = Vec::with_capacity(expected_count);
    for token in text.split_whitespace() {
        let value: i32 = token.parse().map_err(|_| CoreError::Parse {
            path: path.to_path_buf(),
            reason: format!("not a valid integer: {:?}", token),
        })?;
        values.push(value);
    }

    if values.len() != expected_count {
        return Err(CoreError::Parse {
            path: path.to_path_buf(),
            reason: format!(
                "token count mismatch: space-delimited sizing pass expected {}, general-whitespace parse found {}",
                expected_count,
                values.len()
            ),
        });
    }

    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn counts_space_separated_tokens() {
        assert_eq!(count_tokens(b"3 1 4 1 5"), 5);
        assert_eq!(count_tokens(b""), 0);
        assert_eq!(count_tokens(b"42"), 1);
    }

    #[test]
    fn parses_matching_input() {
        let path = Path::new("a.txt");
        let buf = b"3 1 4 1 5";
        let expected = count_tokens(buf);
        let values = parse_into(path, buf, expected).unwrap();
        assert_eq!(values, vec![3, 1, 4, 1, 5]);
    }

    #[test]
    fn parses_negatives_and_duplicates() {
        let path = Path::new("a.txt");
        let buf = b"-1 0 -1 2";
        let expected = count_tokens(buf);
        let values = parse_into(path, buf, expected).unwrap();
        assert_eq!(values, vec![-1, 0, -1, 2]);
    }

    #[test]
    fn empty_input_parses_to_empty() {
        let path = Path::new("a.txt");
        let values = parse_into(path, b"", 0).unwrap();
        assert!(values.is_empty());
    }

    #[test]
    fn tab_separated_input_is_rejected() {
        let path = Path::new("a.txt");
        let buf = b"3\t1\t4";
        let expected = count_tokens(buf); // space-only count sees this as one token
        let err = parse_into(path, buf, expected).unwrap_err();
        assert!(matches!(err, CoreError::Parse { .. }));
    }
}
