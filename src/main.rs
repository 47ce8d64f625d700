//! Demo CLI for the level generator.
//!
//! Usage: `anomaly-grid [seed] [score] [difficulty]`
//!
//! Generates one level, prints it as an ASCII grid (anomaly cell bracketed),
//! then emits the full JSON descriptor. Set `RUST_LOG=debug` to watch the
//! retry loop work.

use std::time::{SystemTime, UNIX_EPOCH};

use anomaly_grid::{generate_level, GenRng, ShapeFamily};

fn glyph(family: ShapeFamily) -> char {
    use ShapeFamily::*;
    match family {
        Square => '#',
        Circle => 'o',
        Triangle => '^',
        Diamond => '<',
        Rectangle => '=',
        Star => '*',
        Ring => '0',
        Semicircle => 'D',
        Horseshoe => 'U',
        Octagon => '8',
        Plus => '+',
        Cross => 'x',
        Pentagon => '5',
        Hexagon => '6',
        Trapezoid => 'T',
        Pacman => 'C',
        QuarterCircle => 'q',
        Arc => '(',
        Zigzag => 'z',
        NotchedSquare => 'N',
        Dash => '-',
        Line => '|',
        Heart => 'h',
        Chevron => 'v',
        Crescent => ')',
    }
}

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seed: u32 = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            // No seed given: derive one from the clock, like a fresh match
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis() as u32)
                .unwrap_or(0)
        });
    let score: u32 = args.next().and_then(|s| s.parse().ok()).unwrap_or(0);
    let difficulty: u32 = args.next().and_then(|s| s.parse().ok()).unwrap_or(1);

    let mut rng = GenRng::new(seed);
    let level = generate_level(&mut rng, difficulty, score);

    println!(
        "seed={seed} score={score} grid={n}x{n} rule={rule:?}",
        n = level.grid_size,
        rule = level.rule_applied,
    );
    for row in 0..level.grid_size {
        let mut line = String::new();
        for col in 0..level.grid_size {
            let i = row * level.grid_size + col;
            let g = glyph(level.shapes[i].family);
            if i == level.anomaly_index {
                line.push_str(&format!("[{g}]"));
            } else {
                line.push_str(&format!(" {g} "));
            }
        }
        println!("{line}");
    }

    match serde_json::to_string_pretty(&level) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("failed to serialize level: {e}"),
    }
}
