/// An item's membership in a row, carrying what the sizer needs.
#[derive(Debug, Clone, PartialEq)]
pub struct RowMember {
    /// Index of the item in the caller's original sequence.
    pub item_index: usize,
    pub ratio: f64,
    pub intrinsic_width: Option<f64>,
}

/// A contiguous, non-empty run of items sharing one visual line.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub index: usize,
    pub members: Vec<RowMember>,
    /// Sum of the member ratios at the moment the row closed.
    pub ratio_sum: f64,
}

impl Row {
    #[cfg(test)]
    pub(crate) fn new(index: usize, members: Vec<RowMember>) -> Self {
        let ratio_sum = members.iter().map(|m| m.ratio).sum();
        Self {
            index,
            members,
            ratio_sum,
        }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn item_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.members.iter().map(|m| m.item_index)
    }
}

/// Final placement of a single item.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutResult {
    pub item_index: usize,
    pub row_index: usize,
    pub width: u32,
    pub height: u32,
    /// Trailing spacing after the item; zero for the last item of a row.
    pub margin_right: u32,
    pub is_first_in_row: bool,
    pub is_last_in_row: bool,
    /// `width / intrinsic_width` rounded to two decimals, when scaling is exposed.
    pub scale: Option<f64>,
}

/// Outcome of one layout pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutOutcome {
    /// True when the container was narrower than the minimum and nothing was laid out.
    pub cancelled: bool,
    pub container_width: f64,
    pub results: Vec<LayoutResult>,
    /// Items excluded because their ratio could not be resolved.
    pub skipped: Vec<usize>,
}

impl LayoutOutcome {
    pub fn cancelled(container_width: f64) -> Self {
        Self {
            cancelled: true,
            container_width,
            results: Vec::new(),
            skipped: Vec::new(),
        }
    }

    pub fn row_count(&self) -> usize {
        self.results
            .last()
            .map(|r| r.row_index + 1)
            .unwrap_or(0)
    }

    pub fn result_for(&self, item_index: usize) -> Option<&LayoutResult> {
        self.results.iter().find(|r| r.item_index == item_index)
    }

    /// Results grouped by row, in row order.
    pub fn rows(&self) -> Vec<&[LayoutResult]> {
        self.results
            .chunk_by(|a, b| a.row_index == b.row_index)
            .collect()
    }
}
