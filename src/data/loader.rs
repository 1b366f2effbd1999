use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use arrow::array::{Array, Float32Array, Float64Array, Int32Array, Int64Array, StringArray};
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{Dataset, PlayerRow, STAT_CATEGORIES};

/// Reserved (non-stat) column names.
const PLAYER_COL: &str = "Player";
const TEAM_COL: &str = "Tm";
const MINUTES_COL: &str = "MP";

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a player table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.parquet` – flat Parquet table (one row per player)
/// * `.json`    – `[{ "Player": ..., "Tm": ..., "MP": ..., ...stats }, ...]`
/// * `.csv`     – header row `Player,Tm,MP,FG,...,PTS`
///
/// Every format must supply the identity columns plus all 22 stat
/// categories; blank numeric cells are read as 0.
pub fn load_file(path: &Path) -> Result<Dataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "parquet" | "pq" => load_parquet(path),
        "json" => load_json(path),
        "csv" => load_csv(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

/// Validate one assembled row: identity present, minutes usable.
fn finish_row(
    row_no: usize,
    player: String,
    team: String,
    minutes: f64,
    stats: BTreeMap<String, f64>,
) -> Result<PlayerRow> {
    if player.is_empty() {
        bail!("Row {row_no}: empty '{PLAYER_COL}'");
    }
    if team.is_empty() {
        bail!("Row {row_no}: empty '{TEAM_COL}'");
    }
    if !minutes.is_finite() || minutes < 0.0 {
        bail!("Row {row_no}: '{MINUTES_COL}' is {minutes}, expected a non-negative number");
    }
    for cat in STAT_CATEGORIES {
        if !stats.contains_key(cat) {
            bail!("Row {row_no}: missing stat column '{cat}'");
        }
    }
    Ok(PlayerRow {
        player,
        team,
        minutes,
        stats,
    })
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default
/// `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "Player": "Trae Young", "Tm": "ATL", "MP": 34.8, "FG": 8.2, ..., "PTS": 26.2 },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<Dataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let records = root.as_array().context("Expected top-level JSON array")?;

    let mut players = Vec::with_capacity(records.len());

    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;

        let player = obj
            .get(PLAYER_COL)
            .and_then(|v| v.as_str())
            .with_context(|| format!("Row {i}: missing or non-string '{PLAYER_COL}'"))?
            .to_string();
        let team = obj
            .get(TEAM_COL)
            .and_then(|v| v.as_str())
            .with_context(|| format!("Row {i}: missing or non-string '{TEAM_COL}'"))?
            .to_string();
        let minutes = obj
            .get(MINUTES_COL)
            .and_then(|v| v.as_f64())
            .with_context(|| format!("Row {i}: missing or non-numeric '{MINUTES_COL}'"))?;

        let mut stats = BTreeMap::new();
        for cat in STAT_CATEGORIES {
            let value = match obj.get(cat) {
                Some(JsonValue::Null) | None => 0.0,
                Some(v) => v
                    .as_f64()
                    .with_context(|| format!("Row {i}, '{cat}': not a number"))?,
            };
            stats.insert(cat.to_string(), value);
        }

        players.push(finish_row(i, player, team, minutes, stats)?);
    }

    Ok(Dataset::from_rows(players))
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, one row per player.
/// Percentage columns may be blank for players with zero attempts.
fn load_csv(path: &Path) -> Result<Dataset> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let col = |name: &str| -> Result<usize> {
        headers
            .iter()
            .position(|h| h == name)
            .with_context(|| format!("CSV missing '{name}' column"))
    };
    let player_idx = col(PLAYER_COL)?;
    let team_idx = col(TEAM_COL)?;
    let minutes_idx = col(MINUTES_COL)?;
    let stat_idx: Vec<(usize, &str)> = STAT_CATEGORIES
        .iter()
        .map(|&cat| col(cat).map(|i| (i, cat)))
        .collect::<Result<_>>()?;

    let mut players = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;

        let player = record.get(player_idx).unwrap_or("").trim().to_string();
        let team = record.get(team_idx).unwrap_or("").trim().to_string();
        let minutes = parse_cell(record.get(minutes_idx).unwrap_or(""), row_no, MINUTES_COL)?;

        let mut stats = BTreeMap::new();
        for &(idx, cat) in &stat_idx {
            let value = parse_cell(record.get(idx).unwrap_or(""), row_no, cat)?;
            stats.insert(cat.to_string(), value);
        }

        players.push(finish_row(row_no, player, team, minutes, stats)?);
    }

    Ok(Dataset::from_rows(players))
}

/// Numeric cell parse; blank cells count as 0 (basketball-reference leaves
/// percentage cells empty when a player has no attempts).
fn parse_cell(s: &str, row: usize, col: &str) -> Result<f64> {
    let s = s.trim();
    if s.is_empty() {
        return Ok(0.0);
    }
    s.parse::<f64>()
        .with_context(|| format!("Row {row}, '{col}': '{s}' is not a number"))
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a flat Parquet table of player rows.
///
/// Expected schema:
/// - `Player`, `Tm`: Utf8
/// - `MP` and the 22 stat columns: any numeric type (Float64 preferred)
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<Dataset> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut players = Vec::new();
    let mut row_no = 0usize;

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;

        let player_col = batch_column(&batch, PLAYER_COL)?;
        let team_col = batch_column(&batch, TEAM_COL)?;
        let minutes_col = batch_column(&batch, MINUTES_COL)?;
        let stat_cols: Vec<(&str, &Arc<dyn Array>)> = STAT_CATEGORIES
            .iter()
            .map(|&cat| batch_column(&batch, cat).map(|c| (cat, c)))
            .collect::<Result<_>>()?;

        for row in 0..batch.num_rows() {
            let player = extract_string(player_col, row)
                .with_context(|| format!("Row {row_no}: failed to read '{PLAYER_COL}'"))?;
            let team = extract_string(team_col, row)
                .with_context(|| format!("Row {row_no}: failed to read '{TEAM_COL}'"))?;
            let minutes = extract_f64(minutes_col, row)
                .with_context(|| format!("Row {row_no}: failed to read '{MINUTES_COL}'"))?;

            let mut stats = BTreeMap::new();
            for &(cat, col_array) in &stat_cols {
                let value = extract_f64(col_array, row)
                    .with_context(|| format!("Row {row_no}: failed to read '{cat}'"))?;
                stats.insert(cat.to_string(), value);
            }

            players.push(finish_row(row_no, player, team, minutes, stats)?);
            row_no += 1;
        }
    }

    Ok(Dataset::from_rows(players))
}

// -- Parquet / Arrow helpers --

fn batch_column<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a Arc<dyn Array>> {
    batch
        .column_by_name(name)
        .with_context(|| format!("Parquet file missing '{name}' column"))
}

/// Extract a string cell from a Utf8 column.
fn extract_string(col: &Arc<dyn Array>, row: usize) -> Result<String> {
    if col.is_null(row) {
        bail!("null value in string column");
    }
    match col.data_type() {
        DataType::Utf8 => {
            let arr = col
                .as_any()
                .downcast_ref::<StringArray>()
                .context("expected StringArray")?;
            Ok(arr.value(row).to_string())
        }
        other => bail!("Expected Utf8 column, got {other:?}"),
    }
}

/// Extract a numeric cell, accepting the integer and float widths Pandas
/// commonly writes. Null cells count as 0 (blank percentage columns).
fn extract_f64(col: &Arc<dyn Array>, row: usize) -> Result<f64> {
    if col.is_null(row) {
        return Ok(0.0);
    }
    let value = match col.data_type() {
        DataType::Float64 => {
            let arr = col.as_any().downcast_ref::<Float64Array>().unwrap();
            arr.value(row)
        }
        DataType::Float32 => {
            let arr = col.as_any().downcast_ref::<Float32Array>().unwrap();
            arr.value(row) as f64
        }
        DataType::Int64 => {
            let arr = col.as_any().downcast_ref::<Int64Array>().unwrap();
            arr.value(row) as f64
        }
        DataType::Int32 => {
            let arr = col.as_any().downcast_ref::<Int32Array>().unwrap();
            arr.value(row) as f64
        }
        other => bail!("Expected a numeric column, got {other:?}"),
    };
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("hoopscope_test_{}_{name}", std::process::id()))
    }

    fn csv_header() -> String {
        let mut cols = vec![PLAYER_COL, TEAM_COL, MINUTES_COL];
        cols.extend(STAT_CATEGORIES);
        cols.join(",")
    }

    /// A CSV line with the given identity and per-category overrides; any
    /// category absent from `overrides` gets 1.0. An override of `""`
    /// leaves the cell blank.
    fn csv_line(player: &str, team: &str, mp: f64, overrides: &[(&str, &str)]) -> String {
        let mut cells = vec![player.to_string(), team.to_string(), mp.to_string()];
        for cat in STAT_CATEGORIES {
            let cell = overrides
                .iter()
                .find(|(c, _)| *c == cat)
                .map(|(_, v)| v.to_string())
                .unwrap_or_else(|| "1.0".to_string());
            cells.push(cell);
        }
        cells.join(",")
    }

    fn write_temp(name: &str, contents: &str) -> PathBuf {
        let path = temp_path(name);
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn csv_loads_with_blank_percentage_cell() {
        // Blank FT% cell (zero attempts) should read as 0.
        let body = format!(
            "{}\n{}\n{}\n",
            csv_header(),
            csv_line("Trae Young", "ATL", 34.8, &[("PTS", "26.2"), ("FT%", "")]),
            csv_line("Jalen Johnson", "ATL", 33.7, &[("PTS", "16.0")]),
        );

        let path = write_temp("blank.csv", &body);
        let ds = load_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(ds.len(), 2);
        assert_eq!(ds.players[0].player, "Trae Young");
        assert_eq!(ds.players[0].stat("PTS"), Some(26.2));
        assert_eq!(ds.players[0].stat("FT%"), Some(0.0));
        assert!(ds.teams.contains("ATL"));
    }

    #[test]
    fn csv_missing_stat_column_is_an_error() {
        let header = csv_header().replace(",PTS", "");
        let line = csv_line("A", "ATL", 30.0, &[]);
        let line = line.rsplit_once(',').unwrap().0.to_string();
        let path = write_temp("missing.csv", &format!("{header}\n{line}\n"));
        let err = load_file(&path).unwrap_err();
        std::fs::remove_file(&path).ok();
        assert!(err.to_string().contains("PTS"), "{err:#}");
    }

    #[test]
    fn csv_negative_minutes_is_an_error() {
        let body = format!("{}\n{}\n", csv_header(), csv_line("A", "ATL", -3.0, &[]));
        let path = write_temp("negmp.csv", &body);
        let err = load_file(&path).unwrap_err();
        std::fs::remove_file(&path).ok();
        assert!(err.to_string().contains("MP"), "{err:#}");
    }

    #[test]
    fn json_records_load() {
        let mut obj = serde_json::Map::new();
        obj.insert(PLAYER_COL.into(), "Cara".into());
        obj.insert(TEAM_COL.into(), "BOS".into());
        obj.insert(MINUTES_COL.into(), 40.0.into());
        for cat in STAT_CATEGORIES {
            obj.insert(cat.into(), 2.5.into());
        }
        let body = serde_json::to_string(&vec![JsonValue::Object(obj)]).unwrap();

        let path = write_temp("rows.json", &body);
        let ds = load_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(ds.len(), 1);
        assert_eq!(ds.players[0].team, "BOS");
        assert_eq!(ds.players[0].minutes, 40.0);
        assert_eq!(ds.players[0].stat("eFG%"), Some(2.5));
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        let err = load_file(Path::new("players.xlsx")).unwrap_err();
        assert!(err.to_string().contains("xlsx"));
    }
}
