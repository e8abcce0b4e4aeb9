use std::env;
use std::fs;
use std::process;

use chordlab::{
    CapturingEngine, ChordLab, LabError, NoteLength, Pitch, PlaybackConfig, PlaybackStyle,
    TriggerEvent, VelocityLevel, TEMPLATES,
};

fn usage() {
    eprintln!("Usage: chordlab <chord> [options]");
    eprintln!("       chordlab --progression <c1,c2,...> [options]");
    eprintln!("       chordlab --template <name> [options]");
    eprintln!("       chordlab --templates");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --arpeggio         arpeggiated playback");
    eprintln!("  --harmonics        spread chord pitches across ascending octaves");
    eprintln!("  --no-bass          omit the bass pitch");
    eprintln!("  --melody <p,p>     melody pitches, e.g. C5,E5");
    eprintln!("  --length <l>       short | medium | long (default medium)");
    eprintln!("  --velocity <v>     low | medium | high (default medium)");
    eprintln!("  --loop-ticks <n>   re-trigger the chord n times at the loop interval");
    eprintln!("  --eight-bar        restart the progression after a closing pause");
    eprintln!("  --passes <n>       progression passes to print (default 2 with --eight-bar)");
    eprintln!("  --config <file>    YAML overrides for timing and loudness");
}

enum Mode {
    Chord(String),
    Progression(Vec<String>),
    Template(String),
}

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        usage();
        process::exit(1);
    }

    let mut mode: Option<Mode> = None;
    let mut arpeggio = false;
    let mut harmonics = false;
    let mut no_bass = false;
    let mut melody: Vec<Pitch> = Vec::new();
    let mut length = NoteLength::Medium;
    let mut velocity = VelocityLevel::Medium;
    let mut loop_ticks: u64 = 0;
    let mut eight_bar = false;
    let mut passes: u64 = 0;
    let mut config = PlaybackConfig::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--templates" => {
                for t in TEMPLATES {
                    println!("{:<12} {}", t.name, t.chords.join(" "));
                }
                return;
            }
            "--progression" => {
                let value = expect_value(&args, i, "--progression");
                mode = Some(Mode::Progression(
                    value.split(',').map(|s| s.trim().to_string()).collect(),
                ));
                i += 2;
            }
            "--template" => {
                mode = Some(Mode::Template(expect_value(&args, i, "--template")));
                i += 2;
            }
            "--arpeggio" => {
                arpeggio = true;
                i += 1;
            }
            "--harmonics" => {
                harmonics = true;
                i += 1;
            }
            "--no-bass" => {
                no_bass = true;
                i += 1;
            }
            "--melody" => {
                let value = expect_value(&args, i, "--melody");
                for part in value.split(',') {
                    match Pitch::parse(part.trim()) {
                        Ok(pitch) => melody.push(pitch),
                        Err(e) => {
                            eprintln!("{}", e);
                            process::exit(1);
                        }
                    }
                }
                i += 2;
            }
            "--length" => {
                let value = expect_value(&args, i, "--length");
                length = match NoteLength::parse(&value) {
                    Some(length) => length,
                    None => {
                        eprintln!("Invalid length '{}': expected short, medium or long", value);
                        process::exit(1);
                    }
                };
                i += 2;
            }
            "--velocity" => {
                let value = expect_value(&args, i, "--velocity");
                velocity = match VelocityLevel::parse(&value) {
                    Some(velocity) => velocity,
                    None => {
                        eprintln!("Invalid velocity '{}': expected low, medium or high", value);
                        process::exit(1);
                    }
                };
                i += 2;
            }
            "--loop-ticks" => {
                loop_ticks = expect_number(&args, i, "--loop-ticks");
                i += 2;
            }
            "--eight-bar" => {
                eight_bar = true;
                i += 1;
            }
            "--passes" => {
                passes = expect_number(&args, i, "--passes");
                i += 2;
            }
            "--config" => {
                let path = expect_value(&args, i, "--config");
                let content = match fs::read_to_string(&path) {
                    Ok(content) => content,
                    Err(e) => {
                        eprintln!("Error reading config '{}': {}", path, e);
                        process::exit(1);
                    }
                };
                config = match PlaybackConfig::from_yaml(&content) {
                    Ok(config) => config,
                    Err(e) => {
                        eprintln!("{}", e);
                        process::exit(1);
                    }
                };
                i += 2;
            }
            flag if flag.starts_with("--") => {
                eprintln!("Unknown option: {}", flag);
                usage();
                process::exit(1);
            }
            chord => {
                mode = Some(Mode::Chord(chord.to_string()));
                i += 1;
            }
        }
    }

    let mode = match mode {
        Some(mode) => mode,
        None => {
            usage();
            process::exit(1);
        }
    };

    if eight_bar && passes == 0 {
        passes = 2;
    }

    let mut lab = ChordLab::new(CapturingEngine::new(), config);
    lab.engine_ready();
    lab.set_note_length(length);
    lab.set_velocity(velocity);
    if arpeggio {
        lab.set_style(PlaybackStyle::Arpeggiated);
    }
    lab.set_harmonics(harmonics);
    lab.set_bass(!no_bass);

    // Horizon caps the timeline when a loop flag would otherwise run forever
    let mut horizon = u64::MAX;

    match mode {
        Mode::Chord(symbol) => {
            if !lab.select_chord(&symbol) {
                eprintln!("Unknown chord symbol: {}", symbol);
                process::exit(1);
            }
            for pitch in &melody {
                lab.toggle_melody_note(*pitch);
            }
            lab.play();
            if loop_ticks > 0 {
                lab.set_looping(true);
                horizon = loop_ticks * lab.config().loop_interval_ms;
            }
        }
        Mode::Progression(symbols) => {
            lab.load_progression(symbols);
            lab.set_eight_bar_loop(eight_bar);
            if eight_bar {
                horizon = progression_horizon(&lab, passes);
            }
            lab.play_progression();
        }
        Mode::Template(name) => {
            if !lab.load_template(&name) {
                eprintln!("{}", LabError::UnknownTemplate(name));
                eprintln!("Run 'chordlab --templates' to list the built-ins.");
                process::exit(1);
            }
            lab.set_eight_bar_loop(eight_bar);
            if eight_bar {
                horizon = progression_horizon(&lab, passes);
            }
            lab.play_progression();
        }
    }

    print_events(0, &lab.engine_mut().drain());
    while let Some(deadline) = lab.next_deadline() {
        if deadline > horizon {
            break;
        }
        lab.advance_to(deadline);
        print_events(deadline, &lab.engine_mut().drain());
    }
}

fn expect_value(args: &[String], i: usize, flag: &str) -> String {
    match args.get(i + 1) {
        Some(value) => value.clone(),
        None => {
            eprintln!("Missing value for {}", flag);
            process::exit(1);
        }
    }
}

fn expect_number(args: &[String], i: usize, flag: &str) -> u64 {
    let value = expect_value(args, i, flag);
    match value.parse() {
        Ok(n) => n,
        Err(_) => {
            eprintln!("Invalid number for {}: {}", flag, value);
            process::exit(1);
        }
    }
}

/// Last trigger time of the final printed pass.
fn progression_horizon(lab: &ChordLab<CapturingEngine>, passes: u64) -> u64 {
    let config = lab.config();
    let len = lab.progression().len() as u64;
    if len == 0 {
        return 0;
    }
    let pass_ms = (len - 1) * config.chord_gap_ms + config.closing_pause_ms;
    (passes.max(1) - 1) * pass_ms + (len - 1) * config.chord_gap_ms
}

fn print_events(t_ms: u64, events: &[TriggerEvent]) {
    for event in events {
        let pitches: Vec<String> = event.pitches.iter().map(|p| p.to_string()).collect();
        let onset = if event.onset_beats > 0.0 {
            format!("  +{:.2}b", event.onset_beats)
        } else {
            String::new()
        };
        println!(
            "t={:>7}ms  {:<24} {}  {:+.1}dB{}",
            t_ms,
            pitches.join(" "),
            event.length.token(),
            event.velocity_db,
            onset
        );
    }
}
