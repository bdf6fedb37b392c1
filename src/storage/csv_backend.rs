use std::{
    fs::{self, File, OpenOptions},
    io::{self, BufRead, BufReader, Read, Seek, SeekFrom, Write},
    path::{Path, PathBuf},
};

use csv::{ReaderBuilder, StringRecord, StringRecordsIntoIter, Terminator, WriterBuilder};
use tracing::{debug, info, warn};

use crate::{
    config::Config,
    errors::{LedgerError, Result},
    ledger::{
        report::accumulate, CategoryList, CategoryTotals, DateWindow, ExpenseRecord,
        ListedExpense, RecordId, DEFAULT_CATEGORIES, LEDGER_HEADER,
    },
    utils::{
        paths::{categories_file_in, ledger_file_in},
        persistence::{ensure_parent_dir, rewrite_atomically, write_string_atomically},
    },
};

/// Owns the ledger CSV and the category list.
///
/// Every call opens the files it needs and releases them before returning.
/// Mutations take `&mut self`, so one store value serializes all writes.
#[derive(Debug, Clone)]
pub struct LedgerStore {
    ledger_path: PathBuf,
    categories_path: PathBuf,
    default_categories: Vec<String>,
}

impl LedgerStore {
    pub fn new(ledger_path: PathBuf, categories_path: PathBuf) -> Self {
        Self {
            ledger_path,
            categories_path,
            default_categories: DEFAULT_CATEGORIES.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Store using the default file names inside `base`.
    pub fn in_dir(base: &Path) -> Self {
        Self::new(ledger_file_in(base), categories_file_in(base))
    }

    pub fn from_config(config: &Config, base: &Path) -> Self {
        Self::new(config.ledger_path(base), config.categories_path(base))
            .with_default_categories(config.default_categories.clone())
    }

    pub fn with_default_categories(mut self, categories: Vec<String>) -> Self {
        self.default_categories = categories;
        self
    }

    pub fn ledger_path(&self) -> &Path {
        &self.ledger_path
    }

    pub fn categories_path(&self) -> &Path {
        &self.categories_path
    }

    /// Creates the ledger with its header and the category file with the
    /// default set. Existing non-empty files are left alone.
    pub fn initialize(&self) -> Result<()> {
        ensure_parent_dir(&self.ledger_path)?;
        let ledger_missing = match fs::metadata(&self.ledger_path) {
            Ok(meta) => meta.len() == 0,
            Err(err) if err.kind() == io::ErrorKind::NotFound => true,
            Err(err) => return Err(err.into()),
        };
        if ledger_missing {
            rewrite_atomically(&self.ledger_path, |out| {
                let mut writer = csv_writer(out, LineEnding::Lf);
                writer.write_record(LEDGER_HEADER)?;
                writer.flush()?;
                Ok(())
            })?;
            info!(path = %self.ledger_path.display(), "created ledger file");
        }

        ensure_parent_dir(&self.categories_path)?;
        if !self.categories_path.exists() {
            let seed = CategoryList::from_lines(&self.default_categories.join("\n"));
            let mut contents = String::new();
            for name in &seed {
                contents.push_str(name);
                contents.push('\n');
            }
            write_string_atomically(&self.categories_path, &contents)?;
            info!(
                path = %self.categories_path.display(),
                count = seed.len(),
                "created category file"
            );
        }
        Ok(())
    }

    pub fn load_categories(&self) -> Result<CategoryList> {
        let text = fs::read_to_string(&self.categories_path)?;
        let list = CategoryList::from_lines(&text);
        debug!(count = list.len(), "loaded categories");
        Ok(list)
    }

    /// Appends a new category and returns it as stored (trimmed).
    pub fn add_category(&mut self, name: &str) -> Result<String> {
        let categories = self.load_categories()?;
        let name = categories.validate_new(name)?;
        repair_trailing_newline(&self.categories_path, LineEnding::Lf)?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.categories_path)?;
        writeln!(file, "{}", name)?;
        file.flush()?;
        info!(category = %name, "category added");
        Ok(name)
    }

    /// Validates raw input and appends one record. Nothing is written when
    /// validation fails.
    pub fn add_expense(
        &mut self,
        date: &str,
        category: &str,
        amount: &str,
        description: &str,
    ) -> Result<RecordId> {
        let record = ExpenseRecord::new(date, category, amount, description)?;
        self.append_expense(&record)
    }

    pub fn append_expense(&mut self, record: &ExpenseRecord) -> Result<RecordId> {
        record.validate()?;
        let existing = self.read_rows()?.len();
        let ending = LineEnding::detect(&self.ledger_path)?;
        repair_trailing_newline(&self.ledger_path, ending)?;
        let file = OpenOptions::new().append(true).open(&self.ledger_path)?;
        let mut writer = csv_writer(file, ending);
        writer.serialize(record)?;
        writer.flush()?;
        let id = RecordId::from_index(existing);
        info!(%id, category = %record.category, amount = %record.amount, "expense added");
        Ok(id)
    }

    /// Lazily reads every record after the header, in file order. Each call
    /// re-opens and re-scans the file.
    pub fn list_expenses(&self) -> Result<ExpenseIter> {
        let mut reader = open_reader(&self.ledger_path)?;
        check_header(reader.headers()?)?;
        debug!(path = %self.ledger_path.display(), "listing expenses");
        Ok(ExpenseIter {
            rows: reader.into_records(),
            next_index: 0,
        })
    }

    /// Collects [`list_expenses`](Self::list_expenses), failing on the first bad row.
    pub fn expenses(&self) -> Result<Vec<ListedExpense>> {
        self.list_expenses()?.collect()
    }

    pub fn expense(&self, id: RecordId) -> Result<ExpenseRecord> {
        self.list_expenses()?
            .nth(id.index())
            .ok_or(LedgerError::NotFound(id))?
            .map(|listed| listed.record)
    }

    /// Removes the row at `id` and returns it.
    pub fn delete_expense(&mut self, id: RecordId) -> Result<ExpenseRecord> {
        let mut rows = self.read_rows()?;
        if id.index() >= rows.len() {
            return Err(LedgerError::NotFound(id));
        }
        let removed = rows.remove(id.index());
        let record = decode_row(&removed)?;
        self.write_rows(rows.iter().map(Row::Raw))?;
        info!(%id, "expense deleted");
        Ok(record)
    }

    /// Replaces the row at `id` with `record`.
    pub fn update_expense(&mut self, id: RecordId, record: &ExpenseRecord) -> Result<()> {
        record.validate()?;
        let rows = self.read_rows()?;
        if id.index() >= rows.len() {
            return Err(LedgerError::NotFound(id));
        }
        self.write_rows(rows.iter().enumerate().map(|(index, row)| {
            if index == id.index() {
                Row::Record(record)
            } else {
                Row::Raw(row)
            }
        }))?;
        info!(%id, "expense updated");
        Ok(())
    }

    /// Removes every row equal to `target`. Returns how many were removed;
    /// zero leaves the file untouched.
    pub fn delete_matching(&mut self, target: &ExpenseRecord) -> Result<usize> {
        let rows = self.read_rows()?;
        let keep: Vec<&StringRecord> = rows
            .iter()
            .filter(|row| !row_matches(row, target))
            .collect();
        let removed = rows.len() - keep.len();
        if removed == 0 {
            debug!("delete matched no rows");
            return Ok(0);
        }
        self.write_rows(keep.into_iter().map(Row::Raw))?;
        info!(removed, "matching expenses deleted");
        Ok(removed)
    }

    /// Replaces every row equal to `target` with `record`. Returns how many
    /// rows matched; zero leaves the file untouched.
    pub fn update_matching(
        &mut self,
        target: &ExpenseRecord,
        record: &ExpenseRecord,
    ) -> Result<usize> {
        record.validate()?;
        let rows = self.read_rows()?;
        let matched = rows.iter().filter(|row| row_matches(row, target)).count();
        if matched == 0 {
            debug!("update matched no rows");
            return Ok(0);
        }
        self.write_rows(rows.iter().map(|row| {
            if row_matches(row, target) {
                Row::Record(record)
            } else {
                Row::Raw(row)
            }
        }))?;
        info!(matched, "matching expenses updated");
        Ok(matched)
    }

    pub fn aggregate_by_category(&self) -> Result<CategoryTotals> {
        self.aggregate_between(DateWindow::default())
    }

    /// Sums amounts per category over the records inside `window`.
    pub fn aggregate_between(&self, window: DateWindow) -> Result<CategoryTotals> {
        let mut totals = CategoryTotals::new();
        for listed in self.list_expenses()? {
            let listed = listed?;
            if window.contains(&listed.record) {
                accumulate(&mut totals, &listed.record);
            }
        }
        debug!(categories = totals.len(), "aggregated expenses");
        Ok(totals)
    }

    fn read_rows(&self) -> Result<Vec<StringRecord>> {
        let mut reader = open_reader(&self.ledger_path)?;
        check_header(reader.headers()?)?;
        let mut rows = Vec::new();
        for row in reader.records() {
            rows.push(row?);
        }
        Ok(rows)
    }

    /// Rewrites the whole ledger, keeping the line ending it already uses.
    fn write_rows<'a>(&self, rows: impl Iterator<Item = Row<'a>>) -> Result<()> {
        let ending = LineEnding::detect(&self.ledger_path)?;
        rewrite_atomically(&self.ledger_path, |out| {
            let mut writer = csv_writer(out, ending);
            writer.write_record(LEDGER_HEADER)?;
            for row in rows {
                match row {
                    Row::Raw(raw) => writer.write_record(raw)?,
                    Row::Record(record) => writer.serialize(record)?,
                }
            }
            writer.flush()?;
            Ok(())
        })
    }
}

/// A row to persist: either kept verbatim or freshly serialized.
enum Row<'a> {
    Raw(&'a StringRecord),
    Record(&'a ExpenseRecord),
}

/// Lazy iterator over the ledger's data rows.
pub struct ExpenseIter {
    rows: StringRecordsIntoIter<File>,
    next_index: usize,
}

impl Iterator for ExpenseIter {
    type Item = Result<ListedExpense>;

    fn next(&mut self) -> Option<Self::Item> {
        let row = self.rows.next()?;
        let id = RecordId::from_index(self.next_index);
        self.next_index += 1;
        Some(
            row.map_err(LedgerError::from)
                .and_then(|row| decode_row(&row))
                .map(|record| ListedExpense { id, record }),
        )
    }
}

fn open_reader(path: &Path) -> Result<csv::Reader<File>> {
    let file = File::open(path)?;
    Ok(ReaderBuilder::new().flexible(true).from_reader(file))
}

/// Record separator of an existing ledger, taken from its header line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineEnding {
    Lf,
    CrLf,
}

impl LineEnding {
    fn detect(path: &Path) -> Result<Self> {
        let mut first_line = Vec::new();
        BufReader::new(File::open(path)?).read_until(b'\n', &mut first_line)?;
        if first_line.ends_with(b"\r\n") {
            Ok(LineEnding::CrLf)
        } else {
            Ok(LineEnding::Lf)
        }
    }

    fn terminator(self) -> Terminator {
        match self {
            LineEnding::Lf => Terminator::Any(b'\n'),
            LineEnding::CrLf => Terminator::CRLF,
        }
    }

    fn as_bytes(self) -> &'static [u8] {
        match self {
            LineEnding::Lf => b"\n",
            LineEnding::CrLf => b"\r\n",
        }
    }
}

fn csv_writer<W: Write>(out: W, ending: LineEnding) -> csv::Writer<W> {
    WriterBuilder::new()
        .has_headers(false)
        .terminator(ending.terminator())
        .from_writer(out)
}

fn check_header(header: &StringRecord) -> Result<()> {
    let matches = header.len() == LEDGER_HEADER.len()
        && header
            .iter()
            .zip(LEDGER_HEADER)
            .all(|(found, expected)| found.trim() == expected);
    if matches {
        Ok(())
    } else {
        Err(LedgerError::MalformedHeader {
            found: header.iter().collect::<Vec<_>>().join(","),
        })
    }
}

fn decode_row(row: &StringRecord) -> Result<ExpenseRecord> {
    let line = row.position().map(|pos| pos.line()).unwrap_or(0);
    if row.len() != LEDGER_HEADER.len() {
        return Err(LedgerError::MalformedRow {
            line,
            reason: format!("expected 4 fields, found {}", row.len()),
        });
    }
    row.deserialize(None).map_err(|err| LedgerError::MalformedRow {
        line,
        reason: err.to_string(),
    })
}

fn row_matches(row: &StringRecord, target: &ExpenseRecord) -> bool {
    match decode_row(row) {
        Ok(record) => record == *target,
        Err(err) => {
            warn!(%err, "skipping undecodable row while matching");
            false
        }
    }
}

/// Appends a newline when a hand-edited file does not end with one, so the
/// next appended line starts on its own row.
fn repair_trailing_newline(path: &Path, ending: LineEnding) -> Result<()> {
    let mut file = match OpenOptions::new().read(true).append(true).open(path) {
        Ok(file) => file,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(err) => return Err(err.into()),
    };
    let len = file.metadata()?.len();
    if len == 0 {
        return Ok(());
    }
    file.seek(SeekFrom::Start(len - 1))?;
    let mut last = [0u8; 1];
    file.read_exact(&mut last)?;
    if last[0] != b'\n' {
        warn!(path = %path.display(), "file did not end with a newline, repairing");
        file.write_all(ending.as_bytes())?;
    }
    Ok(())
}
