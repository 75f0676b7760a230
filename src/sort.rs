// Column sort state: which column is active and in which direction

use crate::format::compare_by;
use crate::models::DatabaseRecord;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SortColumn {
    Name,
    User,
    Size,
    Modified,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub column: SortColumn,
    pub order: SortOrder,
}

impl Default for SortSpec {
    fn default() -> Self {
        Self {
            column: SortColumn::Modified,
            order: SortOrder::Ascending,
        }
    }
}

impl SortSpec {
    /// Header click: a new column starts Descending, the active column flips.
    pub fn activate(&mut self, column: SortColumn) {
        if self.column != column {
            self.column = column;
            self.order = SortOrder::Descending;
        } else {
            self.order = match self.order {
                SortOrder::Ascending => SortOrder::Descending,
                SortOrder::Descending => SortOrder::Ascending,
            };
        }
    }

    /// Comparator direction for the current order. Descending maps to +1.
    pub fn direction(&self) -> i8 {
        match self.order {
            SortOrder::Descending => 1,
            SortOrder::Ascending => -1,
        }
    }

    /// Stable in-place re-order of `records`.
    pub fn apply(&self, records: &mut [DatabaseRecord]) {
        records.sort_by(compare_by(self.column, self.direction()));
    }

    /// Header affordance: the order shown on `column`, if it is the active one.
    pub fn indicator(&self, column: SortColumn) -> Option<SortOrder> {
        (self.column == column).then_some(self.order)
    }
}
