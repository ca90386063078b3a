//! Partition of a file into the slices sent to the upload server.

use std::ops::Range;

/// One contiguous chunk of the file, numbered from 1
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Slice {
    pub number: u32,
    pub range: Range<u64>,
}

impl Slice {
    pub fn len(&self) -> u64 {
        self.range.end - self.range.start
    }

    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }
}

/// Iterator over the slices of `total_size` bytes, each of `slice_size` bytes except
/// the last one which may be shorter.
#[derive(Clone, Debug)]
pub struct SlicePlan {
    total_size: u64,
    slice_size: u64,
    offset: u64,
    number: u32,
}

impl SlicePlan {
    pub fn new(total_size: u64, slice_size: u64) -> crate::Result<Self> {
        if slice_size == 0 {
            return Err(crate::Error::validation("slice size must be greater than 0"));
        }
        Ok(Self {
            total_size,
            slice_size,
            offset: 0,
            number: 0,
        })
    }

    /// Number of slices, `ceil(total_size / slice_size)`
    pub fn slice_count(&self) -> u64 {
        self.total_size.div_ceil(self.slice_size)
    }
}

impl Iterator for SlicePlan {
    type Item = Slice;

    fn next(&mut self) -> Option<Self::Item> {
        if self.offset >= self.total_size {
            return None;
        }
        let start = self.offset;
        let end = start.saturating_add(self.slice_size).min(self.total_size);
        self.offset = end;
        self.number += 1;
        Some(Slice {
            number: self.number,
            range: start..end,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::SlicePlan;

    #[test]
    fn should_split_in_full_slices() {
        let slices: Vec<_> = SlicePlan::new(30, 10).unwrap().collect();
        assert_eq!(slices.len(), 3);
        assert_eq!(slices[2].range, 20..30);
        assert!(slices.iter().all(|s| s.len() == 10));
    }

    #[test]
    fn should_have_shorter_last_slice() {
        let plan = SlicePlan::new(25, 10).unwrap();
        assert_eq!(plan.slice_count(), 3);
        let slices: Vec<_> = plan.collect();
        assert_eq!(slices.len(), 3);
        assert_eq!(slices[2].len(), 5);
    }

    #[test]
    fn should_number_contiguously_and_cover_everything() {
        for (total, size) in [(1, 1), (1, 1000), (999, 1000), (1000, 1000), (1001, 1000), (12345, 7)]
        {
            let plan = SlicePlan::new(total, size).unwrap();
            let expected = plan.slice_count();
            let slices: Vec<_> = plan.collect();
            assert_eq!(slices.len() as u64, expected);
            assert_eq!(expected, total.div_ceil(size));
            let mut offset = 0;
            for (index, slice) in slices.iter().enumerate() {
                assert_eq!(slice.number as usize, index + 1);
                assert_eq!(slice.range.start, offset);
                assert!(!slice.is_empty());
                offset = slice.range.end;
            }
            assert_eq!(offset, total);
        }
    }

    #[test]
    fn should_be_empty_for_empty_content() {
        assert_eq!(SlicePlan::new(0, 10).unwrap().slice_count(), 0);
        assert!(SlicePlan::new(0, 10).unwrap().next().is_none());
    }

    #[test]
    fn should_reject_zero_slice_size() {
        assert!(SlicePlan::new(10, 0).unwrap_err().is_validation());
    }
}
