use std::fmt::{Display, Formatter};
use std::time::Instant;

use gangsheet::entities::{Item, ItemId, Sheet, SheetSize, SheetStatus};
use gangsheet::fsize;
use gangsheet::util::assertions;
use itertools::Itertools;
use log::{debug, info, warn};

use crate::config::NestConfig;
use crate::opt::shelf_packer::{PackResult, pack};

/// Greedy multi-sheet extension of the [shelf packer](crate::opt::shelf_packer).
/// Fills one sheet at a time and opens a new one for whatever is left over.
pub struct Nester {
    pub config: NestConfig,
}

/// Sheets produced by [`Nester::nest_all`] and everything worth telling the user about them
#[derive(Clone, Debug)]
pub struct NestOutcome {
    /// Never empty. If present, the sheet holding the unplaceable items is the last one.
    pub sheets: Vec<Sheet>,
    /// Items that could not be placed on any sheet
    pub unplaced: Vec<Item>,
    pub warnings: Vec<NestWarning>,
}

impl NestOutcome {
    pub fn n_packed_sheets(&self) -> usize {
        self.sheets.iter().filter(|s| !s.is_unplaced()).count()
    }

    pub fn n_placed_items(&self) -> usize {
        self.sheets
            .iter()
            .filter(|s| !s.is_unplaced())
            .map(|s| s.items.len())
            .sum()
    }
}

/// Non-fatal problems encountered while nesting
#[derive(Clone, Debug, PartialEq)]
pub enum NestWarning {
    /// Padding leaves no room on the sheet for any item
    DegenerateSheet { sheet: String, padding: fsize },
    /// Items too large to fit on an empty sheet, even rotated when allowed
    Oversized { items: Vec<(ItemId, String)> },
}

impl Display for NestWarning {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            NestWarning::DegenerateSheet { sheet, padding } => write!(
                f,
                "A padding of {padding}\" leaves no room to place images on a {sheet} sheet"
            ),
            NestWarning::Oversized { items } => {
                write!(
                    f,
                    "Could not place some images as they are too large for the sheet:"
                )?;
                for (id, name) in items {
                    write!(f, "\n{name} ({id})")?;
                }
                Ok(())
            }
        }
    }
}

impl Nester {
    pub fn new(config: NestConfig) -> Self {
        Self { config }
    }

    /// Lays out `items` on as many sheets of `sheet_size` as needed.
    ///
    /// Every round packs the remaining items on a fresh sheet. When a round places nothing,
    /// the leftovers can never fit and are collected on a trailing sheet with status
    /// [`SheetStatus::Unplaced`]. Without items the outcome is a single empty sheet.
    pub fn nest_all(&self, items: &[Item], sheet_size: &SheetSize) -> NestOutcome {
        let start = Instant::now();
        let area = sheet_size.packable_area(self.config.padding);
        let gutter = self.config.gutter_px();

        let mut sheets: Vec<Sheet> = vec![];
        let mut unplaced = vec![];
        let mut warnings = vec![];

        if area.is_degenerate() && !items.is_empty() {
            warn!(
                "[NEST] packable area of sheet {} is empty with a padding of {}\"",
                sheet_size.name, self.config.padding
            );
            warnings.push(NestWarning::DegenerateSheet {
                sheet: sheet_size.name.to_string(),
                padding: self.config.padding,
            });
        }

        let mut remaining = items.to_vec();
        while !remaining.is_empty() {
            let PackResult {
                placed,
                unplaced: leftover,
            } = pack(&remaining, area, gutter, self.config.allow_rotation);

            if placed.is_empty() {
                let name = format!("Sheet {} (Unplaced)", sheets.len() + 1);
                warn!(
                    "[NEST] {} items do not fit on an empty {} sheet, moved to {name}",
                    leftover.len(),
                    sheet_size.name
                );
                if !area.is_degenerate() {
                    warnings.push(NestWarning::Oversized {
                        items: leftover.iter().map(|i| (i.id, i.name.clone())).collect_vec(),
                    });
                }
                let mut sheet = Sheet::new(name, sheet_size.clone());
                sheet.status = SheetStatus::Unplaced;
                sheet.items = leftover.clone();
                sheets.push(sheet);
                unplaced = leftover;
                break;
            }

            debug!(
                "[NEST] Sheet {} holds {} items, {} remaining",
                sheets.len() + 1,
                placed.len(),
                leftover.len()
            );
            let mut sheet = Sheet::new(format!("Sheet {}", sheets.len() + 1), sheet_size.clone());
            sheet.items = placed;
            sheets.push(sheet);
            remaining = leftover;
        }

        if sheets.is_empty() {
            sheets.push(Sheet::new("Sheet 1", sheet_size.clone()));
        }

        debug_assert!(sheets.len() <= items.len() + 1);
        debug_assert!(assertions::sheets_valid(
            &sheets,
            self.config.padding,
            gutter
        ));

        let outcome = NestOutcome {
            sheets,
            unplaced,
            warnings,
        };

        info!(
            "[NEST] nested {}/{} items on {} sheets in {:.3}ms",
            outcome.n_placed_items(),
            items.len(),
            outcome.n_packed_sheets(),
            start.elapsed().as_secs_f64() * 1000.0
        );

        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: u64, name: &str, w: fsize, h: fsize) -> Item {
        Item::new(ItemId(id), name, w, h)
    }

    fn nester(padding: fsize, gutter: fsize) -> Nester {
        Nester::new(NestConfig {
            padding,
            gutter,
            ..NestConfig::default()
        })
    }

    #[test]
    fn overflow_opens_new_sheets() {
        //two 10x10 items per 22x12 sheet
        let items = (0..5).map(|i| item(i, "square", 10.0, 10.0)).collect_vec();
        let outcome = nester(0.5, 0.5).nest_all(&items, &SheetSize::new("s", 22.0, 12.0));
        let names = outcome.sheets.iter().map(|s| s.name.as_str()).collect_vec();
        assert_eq!(names, vec!["Sheet 1", "Sheet 2", "Sheet 3"]);
        assert_eq!(
            outcome.sheets.iter().map(|s| s.items.len()).collect_vec(),
            vec![2, 2, 1]
        );
        assert!(outcome.unplaced.is_empty());
        assert!(outcome.warnings.is_empty());
    }

    #[test]
    fn oversized_items_end_on_trailing_sheet() {
        let items = vec![
            item(0, "fits", 2.0, 2.0),
            item(1, "banner", 30.0, 2.0),
            item(2, "broken", 0.0, 1.0),
        ];
        let outcome = nester(0.5, 0.5).nest_all(&items, &SheetSize::default());
        assert_eq!(outcome.sheets.len(), 2);
        let trailing = &outcome.sheets[1];
        assert_eq!(trailing.name, "Sheet 2 (Unplaced)");
        assert!(trailing.is_unplaced());
        assert_eq!(
            trailing.items.iter().map(|i| i.id).collect_vec(),
            vec![ItemId(1), ItemId(2)]
        );
        assert_eq!(outcome.unplaced, trailing.items);

        let warning = outcome.warnings[0].to_string();
        assert!(warning.starts_with("Could not place some images"));
        assert!(warning.contains("banner (#1)"));
        assert!(warning.contains("broken (#2)"));
    }

    #[test]
    fn degenerate_sheet_places_nothing() {
        let items = vec![item(0, "a", 1.0, 1.0)];
        let outcome = nester(11.0, 0.5).nest_all(&items, &SheetSize::default());
        assert_eq!(outcome.sheets.len(), 1);
        assert!(outcome.sheets[0].is_unplaced());
        assert_eq!(outcome.sheets[0].name, "Sheet 1 (Unplaced)");
        assert!(matches!(
            outcome.warnings.as_slice(),
            [NestWarning::DegenerateSheet { .. }]
        ));
    }

    #[test]
    fn caller_items_are_untouched() {
        let items = vec![item(0, "a", 3.0, 1.0), item(1, "b", 1.0, 3.0)];
        let copy = items.clone();
        let outcome = nester(0.5, 0.5).nest_all(&items, &SheetSize::default());
        assert_eq!(items, copy);
        assert_eq!(outcome.n_placed_items(), 2);
    }
}
