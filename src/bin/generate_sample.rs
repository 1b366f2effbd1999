use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

/// Stat columns in the order the dashboard expects.
const STAT_COLUMNS: [&str; 22] = [
    "FG", "FGA", "FG%", "3P", "3PA", "3P%", "2P", "2PA", "2P%", "eFG%", "FT", "FTA", "FT%", "ORB",
    "DRB", "TRB", "AST", "STL", "BLK", "TOV", "PF", "PTS",
];

const TEAMS: [&str; 30] = [
    "ATL", "BOS", "BRK", "CHI", "CHO", "CLE", "DAL", "DEN", "DET", "GSW", "HOU", "IND", "LAC",
    "LAL", "MEM", "MIA", "MIL", "MIN", "NOP", "NYK", "OKC", "ORL", "PHI", "PHO", "POR", "SAC",
    "SAS", "TOR", "UTA", "WAS",
];

const FIRST_NAMES: [&str; 16] = [
    "Marcus", "Jalen", "Devin", "Trae", "Darius", "Malik", "Isaiah", "Jaylen", "Cameron", "Tyrese",
    "Keegan", "Desmond", "Anfernee", "Jaden", "Obi", "Grayson",
];

const LAST_NAMES: [&str; 16] = [
    "Johnson", "Williams", "Murray", "Brooks", "Hunter", "Bridges", "Porter", "Mathurin",
    "Sengun", "Wagner", "Giddey", "Sharpe", "Vassell", "Duren", "Holmgren", "Barnes",
];

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform value in [lo, hi).
    fn range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

fn round3(v: f64) -> f64 {
    (v * 1000.0).round() / 1000.0
}

fn pct(made: f64, attempted: f64) -> f64 {
    if attempted > 0.0 {
        round3(made / attempted)
    } else {
        0.0
    }
}

/// One synthetic player-season: per-game stats kept internally consistent
/// (FG = 2P + 3P, TRB = ORB + DRB, PTS from makes, percentages derived).
fn generate_player(rng: &mut SimpleRng) -> (f64, Vec<(&'static str, f64)>) {
    // Rotation players get more minutes than bench ones.
    let mp = round1(rng.range(6.0, 38.0));
    let usage = mp / 48.0;

    let fga = round1(usage * rng.range(14.0, 30.0));
    let fg3a = round1(fga * rng.range(0.15, 0.55));
    let fg2a = round1(fga - fg3a);
    let fg3 = round1(fg3a * rng.range(0.28, 0.42));
    let fg2 = round1(fg2a * rng.range(0.42, 0.60));
    let fg = round1(fg2 + fg3);
    let fta = round1(usage * rng.range(1.0, 9.0));
    let ft = round1(fta * rng.range(0.65, 0.90));
    let pts = round1(2.0 * fg2 + 3.0 * fg3 + ft);

    let orb = round1(usage * rng.range(0.3, 3.5));
    let drb = round1(usage * rng.range(1.5, 8.0));
    let trb = round1(orb + drb);
    let ast = round1(usage * rng.range(0.8, 9.0));
    let stl = round1(usage * rng.range(0.2, 1.8));
    let blk = round1(usage * rng.range(0.0, 1.6));
    let tov = round1(usage * rng.range(0.5, 3.5));
    let pf = round1(rng.range(0.8, 3.8));

    let stats = vec![
        ("FG", fg),
        ("FGA", fga),
        ("FG%", pct(fg, fga)),
        ("3P", fg3),
        ("3PA", fg3a),
        ("3P%", pct(fg3, fg3a)),
        ("2P", fg2),
        ("2PA", fg2a),
        ("2P%", pct(fg2, fg2a)),
        ("eFG%", pct(fg + 0.5 * fg3, fga)),
        ("FT", ft),
        ("FTA", fta),
        ("FT%", pct(ft, fta)),
        ("ORB", orb),
        ("DRB", drb),
        ("TRB", trb),
        ("AST", ast),
        ("STL", stl),
        ("BLK", blk),
        ("TOV", tov),
        ("PF", pf),
        ("PTS", pts),
    ];
    (mp, stats)
}

fn main() {
    let mut rng = SimpleRng::new(42);

    let roster_size = 12;
    let mut players: Vec<String> = Vec::new();
    let mut teams: Vec<String> = Vec::new();
    let mut minutes: Vec<f64> = Vec::new();
    let mut stat_columns: Vec<Vec<f64>> = vec![Vec::new(); STAT_COLUMNS.len()];

    for team in TEAMS {
        for slot in 0..roster_size {
            let first = FIRST_NAMES[(rng.next_u64() % 16) as usize];
            let last = LAST_NAMES[(rng.next_u64() % 16) as usize];
            players.push(format!("{first} {last} ({team}-{slot})"));
            teams.push(team.to_string());

            let (mp, stats) = generate_player(&mut rng);
            minutes.push(mp);
            for (i, (name, value)) in stats.iter().enumerate() {
                assert_eq!(*name, STAT_COLUMNS[i]);
                stat_columns[i].push(*value);
            }
        }
    }

    // Build the Arrow schema: identity columns plus the 22 stats.
    let mut fields = vec![
        Field::new("Player", DataType::Utf8, false),
        Field::new("Tm", DataType::Utf8, false),
        Field::new("MP", DataType::Float64, false),
    ];
    for name in STAT_COLUMNS {
        fields.push(Field::new(name, DataType::Float64, false));
    }
    let schema = Arc::new(Schema::new(fields));

    let mut columns: Vec<ArrayRef> = vec![
        Arc::new(StringArray::from(
            players.iter().map(|s| s.as_str()).collect::<Vec<_>>(),
        )),
        Arc::new(StringArray::from(
            teams.iter().map(|s| s.as_str()).collect::<Vec<_>>(),
        )),
        Arc::new(Float64Array::from(minutes)),
    ];
    for values in stat_columns {
        columns.push(Arc::new(Float64Array::from(values)));
    }

    let batch =
        RecordBatch::try_new(schema.clone(), columns).expect("Failed to create RecordBatch");

    // Write Parquet
    let output_path = "sample_players.parquet";
    let file = std::fs::File::create(output_path).expect("Failed to create output file");
    let mut writer = ArrowWriter::try_new(file, schema, None).expect("Failed to create writer");
    writer.write(&batch).expect("Failed to write batch");
    writer.close().expect("Failed to close writer");

    println!(
        "Wrote {} players across {} teams to {output_path}",
        players.len(),
        TEAMS.len()
    );
}
