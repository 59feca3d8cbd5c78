use std::collections::BTreeSet;

use tracing::{debug, info};

use crate::errors::{LedgerError, Result};
use crate::ledger::{batch, CategoryTree, Record};

/// Top-level categories assigned to records imported from the two-field format.
pub const LEGACY_EXPENSE_CATEGORY: &str = "expense";
pub const LEGACY_INCOME_CATEGORY: &str = "income";

/// Ordered collection of records plus the balance they started from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ledger {
    pub initial_balance: i64,
    records: Vec<Record>,
}

/// Records matched by [`Ledger::filter`] and the sum of their amounts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterResult<'a> {
    pub records: Vec<&'a Record>,
    pub total: i128,
}

impl Ledger {
    pub fn new(initial_balance: i64) -> Self {
        Self {
            initial_balance,
            records: Vec::new(),
        }
    }

    pub fn with_records(initial_balance: i64, records: Vec<Record>) -> Self {
        Self {
            initial_balance,
            records,
        }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Appends one record after checking its category against `tree`.
    pub fn append(
        &mut self,
        tree: &CategoryTree,
        category: &str,
        description: &str,
        amount: i64,
    ) -> Result<()> {
        ensure_category(tree, category)?;
        self.records.push(Record::new(category, description, amount));
        debug!(category, amount, "record appended");
        Ok(())
    }

    /// Parses and validates a comma-separated batch, then appends all of it.
    /// On any error the ledger is left untouched.
    pub fn append_batch(&mut self, tree: &CategoryTree, input: &str) -> Result<usize> {
        let parsed = batch::parse_batch(input)?;
        for record in &parsed {
            ensure_category(tree, record.category())?;
        }
        let added = parsed.len();
        self.records.extend(parsed);
        info!(added, total = self.records.len(), "batch appended");
        Ok(added)
    }

    /// Removes the record at a 1-based position and returns it.
    pub fn delete_at(&mut self, index: i64) -> Result<Record> {
        let len = self.records.len();
        let position = usize::try_from(index)
            .ok()
            .filter(|position| (1..=len).contains(position))
            .ok_or(LedgerError::IndexOutOfRange { index, len })?;
        let removed = self.records.remove(position - 1);
        info!(index, remaining = self.records.len(), "record deleted");
        Ok(removed)
    }

    /// Current balance; recomputed on every call. Sums are widened so any
    /// mix of `i64` amounts adds up without overflow.
    pub fn balance(&self) -> i128 {
        i128::from(self.initial_balance) + sum_amounts(self.records.iter())
    }

    /// Records whose category is in `categories`, in ledger order.
    pub fn filter(&self, categories: &BTreeSet<String>) -> FilterResult<'_> {
        let records: Vec<&Record> = self
            .records
            .iter()
            .filter(|record| categories.contains(record.category()))
            .collect();
        let total = sum_amounts(records.iter().copied());
        FilterResult { records, total }
    }

    /// Renders the ledger in the flat text layout: the initial balance on the
    /// first line, then one `category description amount` line per record.
    pub fn serialize(&self) -> String {
        let mut out = format!("{}\n", self.initial_balance);
        for record in &self.records {
            out.push_str(&record.to_string());
            out.push('\n');
        }
        out
    }

    /// Parses the flat text layout. Any malformed line fails the whole load.
    /// Files whose detail lines all carry two fields are imported as legacy
    /// `description amount` records.
    pub fn deserialize(text: &str, tree: &CategoryTree) -> Result<Self> {
        let mut lines = text
            .lines()
            .enumerate()
            .map(|(idx, line)| (idx + 1, line.trim()))
            .filter(|(_, line)| !line.is_empty());

        let (_, first) = lines
            .next()
            .ok_or_else(|| LedgerError::MalformedState("file is empty".into()))?;
        let initial_balance = first.parse::<i64>().map_err(|_| {
            LedgerError::MalformedState(format!("line 1: `{first}` is not an integer balance"))
        })?;

        let rows: Vec<(usize, Vec<&str>)> = lines
            .map(|(number, line)| (number, line.split_whitespace().collect()))
            .collect();
        let legacy = !rows.is_empty() && rows.iter().all(|(_, fields)| fields.len() == 2);
        if legacy {
            debug!(rows = rows.len(), "importing legacy two-field records");
        }

        let mut records = Vec::with_capacity(rows.len());
        for (number, fields) in rows {
            let record = match fields.as_slice() {
                [category, description, amount] if !legacy => {
                    Record::new(*category, *description, state_amount(number, amount)?)
                }
                [description, amount] if legacy => {
                    let amount = state_amount(number, amount)?;
                    let category = legacy_category(amount);
                    if !tree.is_valid(category) {
                        return Err(LedgerError::MalformedState(format!(
                            "line {number}: legacy record needs category `{category}`"
                        )));
                    }
                    Record::new(category, *description, amount)
                }
                other => {
                    return Err(LedgerError::MalformedState(format!(
                        "line {number}: expected 3 fields, found {}",
                        other.len()
                    )))
                }
            };
            records.push(record);
        }

        Ok(Self::with_records(initial_balance, records))
    }
}

fn sum_amounts<'a>(records: impl Iterator<Item = &'a Record>) -> i128 {
    records.map(|record| i128::from(record.amount())).sum()
}

fn ensure_category(tree: &CategoryTree, category: &str) -> Result<()> {
    if tree.is_valid(category) {
        Ok(())
    } else {
        Err(LedgerError::UnknownCategory(category.to_string()))
    }
}

fn state_amount(number: usize, raw: &str) -> Result<i64> {
    batch::parse_amount(raw).map_err(|_| {
        LedgerError::MalformedState(format!("line {number}: `{raw}` is not an integer amount"))
    })
}

fn legacy_category(amount: i64) -> &'static str {
    if amount < 0 {
        LEGACY_EXPENSE_CATEGORY
    } else {
        LEGACY_INCOME_CATEGORY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Ledger {
        Ledger::with_records(
            100,
            vec![
                Record::new("meal", "a", -10),
                Record::new("food", "b", -5),
                Record::new("bus", "c", -2),
            ],
        )
    }

    #[test]
    fn balance_tracks_every_mutation() {
        let tree = CategoryTree::default();
        let mut ledger = sample();
        assert_eq!(ledger.balance(), 83);

        ledger.append(&tree, "salary", "june", 500).unwrap();
        assert_eq!(ledger.balance(), 583);

        ledger.delete_at(1).unwrap();
        assert_eq!(
            ledger.balance(),
            i128::from(ledger.initial_balance)
                + ledger
                    .records()
                    .iter()
                    .map(|record| i128::from(record.amount()))
                    .sum::<i128>()
        );
    }

    #[test]
    fn balance_beyond_i64_range_does_not_overflow() {
        let tree = CategoryTree::default();
        let mut ledger = Ledger::new(i64::MAX);
        ledger.append_batch(&tree, "salary x 1, bonus y 1").unwrap();
        assert_eq!(ledger.balance(), i128::from(i64::MAX) + 2);

        let mut ledger = Ledger::new(i64::MIN);
        ledger.append(&tree, "meal", "z", i64::MIN).unwrap();
        assert_eq!(ledger.balance(), i128::from(i64::MIN) * 2);

        let everything = tree.expand("expense");
        assert_eq!(ledger.filter(&everything).total, i128::from(i64::MIN));
    }

    #[test]
    fn delete_reports_removed_record() {
        let mut ledger = sample();
        let removed = ledger.delete_at(2).unwrap();
        assert_eq!(removed.to_string(), "food b -5");
        assert_eq!(
            ledger.records(),
            &[Record::new("meal", "a", -10), Record::new("bus", "c", -2)]
        );

        let err = ledger.delete_at(10).unwrap_err();
        assert!(matches!(err, LedgerError::IndexOutOfRange { index: 10, len: 2 }));
        assert_eq!(ledger.len(), 2);
    }

    #[test]
    fn delete_rejects_zero_and_negative() {
        let mut ledger = sample();
        assert!(ledger.delete_at(0).is_err());
        assert!(ledger.delete_at(-1).is_err());
        assert_eq!(ledger.len(), 3);
    }

    #[test]
    fn filter_keeps_order_and_sums() {
        let ledger = Ledger::with_records(
            0,
            vec![
                Record::new("meal", "x", -10),
                Record::new("bus", "y", -5),
                Record::new("meal", "z", -3),
            ],
        );
        let wanted: BTreeSet<String> = ["meal".to_string()].into_iter().collect();
        let result = ledger.filter(&wanted);
        let descriptions: Vec<&str> = result.records.iter().map(|r| r.description()).collect();
        assert_eq!(descriptions, vec!["x", "z"]);
        assert_eq!(result.total, -13);
    }

    #[test]
    fn batch_is_all_or_nothing() {
        let tree = CategoryTree::default();
        let mut ledger = Ledger::new(0);

        let err = ledger
            .append_batch(&tree, "food bread -80, drink soda abc")
            .unwrap_err();
        assert!(matches!(err, LedgerError::MalformedInput(_)));
        assert!(ledger.is_empty());

        let err = ledger
            .append_batch(&tree, "food bread -80, clothing pants -100")
            .unwrap_err();
        assert!(matches!(err, LedgerError::UnknownCategory(ref name) if name == "clothing"));
        assert!(ledger.is_empty());

        let added = ledger
            .append_batch(&tree, "food bread -80, drink soda -20")
            .unwrap();
        assert_eq!(added, 2);
        assert_eq!(ledger.balance(), -100);
    }

    #[test]
    fn append_rejects_unknown_category() {
        let tree = CategoryTree::default();
        let mut ledger = Ledger::new(0);
        assert!(ledger.append(&tree, "clothing", "pants", -100).is_err());
        assert!(ledger.is_empty());
    }

    #[test]
    fn serialized_text_reloads_identically() {
        let tree = CategoryTree::default();
        let ledger = sample();
        let text = ledger.serialize();
        assert_eq!(text, "100\nmeal a -10\nfood b -5\nbus c -2\n");
        assert_eq!(Ledger::deserialize(&text, &tree).unwrap(), ledger);
    }

    #[test]
    fn deserialize_is_strict_about_detail_lines() {
        let tree = CategoryTree::default();
        let err = Ledger::deserialize("1000\nmeal breakfast -50\nbroken\n", &tree).unwrap_err();
        assert!(matches!(err, LedgerError::MalformedState(ref msg) if msg.starts_with("line 3")));

        let err = Ledger::deserialize("1000\nmeal breakfast fifty\n", &tree).unwrap_err();
        assert!(matches!(err, LedgerError::MalformedState(_)));

        let err = Ledger::deserialize("lots\n", &tree).unwrap_err();
        assert!(matches!(err, LedgerError::MalformedState(_)));

        assert!(Ledger::deserialize("", &tree).is_err());
    }

    #[test]
    fn deserialize_skips_blank_lines() {
        let tree = CategoryTree::default();
        let ledger = Ledger::deserialize("\n1000\n\nmeal breakfast -50\n\n", &tree).unwrap();
        assert_eq!(ledger.initial_balance, 1000);
        assert_eq!(ledger.records(), &[Record::new("meal", "breakfast", -50)]);
    }

    #[test]
    fn legacy_two_field_files_are_imported() {
        let tree = CategoryTree::default();
        let ledger = Ledger::deserialize("500\nbreakfast -50\nbonus 200\n", &tree).unwrap();
        assert_eq!(
            ledger.records(),
            &[
                Record::new("expense", "breakfast", -50),
                Record::new("income", "bonus", 200),
            ]
        );
    }

    #[test]
    fn mixed_field_counts_are_malformed() {
        let tree = CategoryTree::default();
        let err = Ledger::deserialize("500\nbreakfast -50\nmeal lunch -80\n", &tree).unwrap_err();
        assert!(matches!(err, LedgerError::MalformedState(_)));
    }
}
