// SPDX-License-Identifier: MIT
//
// tonal — perceptual color scales, checked against APCA and WCAG.
//
// This binary wires the crates together behind four subcommands:
//
//   analyze   → generate a scale, print the filtered contrast matrix,
//               badge rankings and per-step usage advice
//   fix       → run the APCA auto-fix and print what changed
//   recommend → name the APCA preset that suits a scale
//   presets   → list builtin APCA and curve presets
//
// Flow for every command:
//
//   argv → parse_args → Invocation → (config loaded once) → run → stdout
//
// Arguments are parsed by hand; there are few enough flags that a parser
// framework would outweigh them.

use std::env;
use std::fmt::Write as _;
use std::path::PathBuf;
use std::process;

use tonal_color::Color;
use tonal_scale::advisor::advise;
use tonal_scale::autofix::{ApcaTarget, AutoFixOptions, AutoFixResult, Priority, auto_fix};
use tonal_scale::config::ContrastConfig;
use tonal_scale::curve::{builtin_curve, builtin_curve_names};
use tonal_scale::filter::{ContrastThreshold, filter_pairs, rank_badges};
use tonal_scale::matrix::build_matrix;
use tonal_scale::preset::{apca_preset, builtin_preset_names, recommend_apca_preset};
use tonal_scale::scale::{ColorScale, ContrastMode, TargetBackground};

const USAGE: &str = "\
usage: tonal <command> [options]

commands:
  analyze     contrast matrix, badge rankings and usage advice
  fix         auto-fix the scale toward APCA targets
  recommend   recommend an APCA preset for the scale
  presets     list builtin presets

scale options:
  --hue H              base hue in degrees (default 240)
  --chroma C           peak chroma (default 0.15)
  --curve NAME         builtin curve preset
  --bg white|gray|black
                       reference background (default white)
  --mode wcag|apca     contrast mode (default wcag)
  --compensate         enable chroma compensation
  --config FILE        contrast configuration JSON

analyze options:
  --apca               filter on APCA |Lc| instead of WCAG ratio
  --min N / --max N    filter bounds for the chosen metric
  --passing            without --min/--max, keep pairs that pass the
                       scale's contrast mode (WCAG AA or APCA pass)

fix options:
  --preset NAME        use a builtin APCA preset's targets
  --target LC[:HEX[:PRIORITY]]
                       add a target (default background #FFFFFF, priority must)
  --tolerance N        allowed Lc error (default 1.0)
  --no-preserve-endpoints
                       allow steps 98 and 14 to move

recommend options:
  --page HEX           page background (default #FFFFFF)
";

// ─── Invocation ─────────────────────────────────────────────────────────────

/// What the user asked for, fully parsed.
#[derive(Debug, Clone, PartialEq)]
enum Command {
    Analyze { threshold: ContrastThreshold, passing: bool },
    Fix { targets: Vec<ApcaTarget>, options: AutoFixOptions },
    Recommend { page: String },
    Presets,
    Help,
}

#[derive(Debug, Clone, PartialEq)]
struct Invocation {
    command: Command,
    scale: ColorScale,
    config_path: Option<PathBuf>,
}

fn parse_number<T: std::str::FromStr>(flag: &str, value: Option<&String>) -> Result<T, String> {
    let value = value.ok_or_else(|| format!("{flag} needs a value"))?;
    value
        .parse()
        .map_err(|_| format!("{flag}: {value:?} is not a number"))
}

fn parse_text<'a>(flag: &str, value: Option<&'a String>) -> Result<&'a str, String> {
    value
        .map(String::as_str)
        .ok_or_else(|| format!("{flag} needs a value"))
}

/// Parse `LC[:HEX[:PRIORITY]]`.
fn parse_target(spec: &str) -> Result<ApcaTarget, String> {
    let mut parts = spec.split(':');
    let lc: f64 = parts
        .next()
        .unwrap_or_default()
        .parse()
        .map_err(|_| format!("--target {spec:?}: Lc must be a number"))?;
    let background = parts.next().filter(|s| !s.is_empty()).unwrap_or("#FFFFFF");
    if Color::hex(background).is_none() {
        return Err(format!("--target {spec:?}: {background:?} is not a hex color"));
    }
    let priority = match parts.next() {
        Some(p) => Priority::from_name(p)
            .ok_or_else(|| format!("--target {spec:?}: priority must be must, should or nice"))?,
        None => Priority::Must,
    };
    if parts.next().is_some() {
        return Err(format!("--target {spec:?}: too many fields"));
    }
    Ok(ApcaTarget::new(lc, background, priority))
}

fn parse_args(args: &[String]) -> Result<Invocation, String> {
    let Some(name) = args.first() else {
        return Ok(Invocation {
            command: Command::Help,
            scale: ColorScale::default(),
            config_path: None,
        });
    };

    let mut scale = ColorScale::default();
    let mut config_path = None;
    let mut threshold = ContrastThreshold::default();
    let mut targets = Vec::new();
    let mut options = AutoFixOptions::default();
    let mut page = "#FFFFFF".to_string();
    let mut passing = false;

    let mut it = args[1..].iter();
    while let Some(flag) = it.next() {
        match flag.as_str() {
            "--hue" => scale.hue = parse_number(flag, it.next())?,
            "--chroma" => scale.manual_chroma = parse_number(flag, it.next())?,
            "--curve" => {
                let name = parse_text(flag, it.next())?;
                let preset = builtin_curve(name)
                    .ok_or_else(|| format!("unknown curve preset {name:?}"))?;
                scale = scale.with_curves(&preset);
            }
            "--bg" => {
                let name = parse_text(flag, it.next())?;
                scale.target_background = TargetBackground::from_name(name)
                    .ok_or_else(|| format!("--bg must be white, gray or black, got {name:?}"))?;
            }
            "--mode" => {
                let name = parse_text(flag, it.next())?;
                scale.contrast_mode = ContrastMode::from_name(name)
                    .ok_or_else(|| format!("--mode must be wcag or apca, got {name:?}"))?;
            }
            "--compensate" => scale.chroma_compensation = true,
            "--config" => config_path = Some(PathBuf::from(parse_text(flag, it.next())?)),
            "--apca" => threshold.use_apca = true,
            "--passing" => passing = true,
            "--min" => {
                let v = parse_number(flag, it.next())?;
                threshold.min_apca = Some(v);
                threshold.min_wcag = Some(v);
            }
            "--max" => {
                let v = parse_number(flag, it.next())?;
                threshold.max_apca = Some(v);
                threshold.max_wcag = Some(v);
            }
            "--preset" => {
                let name = parse_text(flag, it.next())?;
                let preset =
                    apca_preset(name).ok_or_else(|| format!("unknown APCA preset {name:?}"))?;
                targets.extend(preset.targets);
            }
            "--target" => targets.push(parse_target(parse_text(flag, it.next())?)?),
            "--tolerance" => options.tolerance = parse_number(flag, it.next())?,
            "--no-preserve-endpoints" => options.preserve_endpoints = false,
            "--page" => page = parse_text(flag, it.next())?.to_string(),
            "-h" | "--help" => {
                return Ok(Invocation {
                    command: Command::Help,
                    scale,
                    config_path,
                });
            }
            other => return Err(format!("unknown option {other:?}")),
        }
    }

    let command = match name.as_str() {
        "analyze" => Command::Analyze { threshold, passing },
        "fix" => Command::Fix { targets, options },
        "recommend" => Command::Recommend { page },
        "presets" => Command::Presets,
        "help" | "-h" | "--help" => Command::Help,
        other => return Err(format!("unknown command {other:?}")),
    };

    Ok(Invocation {
        command,
        scale,
        config_path,
    })
}

// ─── Rendering ──────────────────────────────────────────────────────────────

fn render_analysis(
    scale: &ColorScale,
    threshold: &ContrastThreshold,
    config: &ContrastConfig,
) -> String {
    let colors = scale.colors(&config.step_labels);
    let pairs = build_matrix(&colors, config);
    let mut out = String::new();

    let _ = writeln!(
        out,
        "scale: hue {:.1}, chroma {:.3}, mode {}, background {}",
        scale.hue,
        scale.manual_chroma,
        scale.contrast_mode.name(),
        scale.target_background.name()
    );
    for sc in &colors {
        let _ = writeln!(
            out,
            "  {:>5.1}  {}  {:?}  on white {:>5.2}:1 / Lc {:>5.1}",
            sc.step, sc.hex, sc.color, sc.contrast.on_white.wcag, sc.contrast.on_white.apca
        );
    }

    let total = pairs.len();
    let filtered = filter_pairs(pairs, threshold);
    let metric = if threshold.use_apca { "APCA" } else { "WCAG" };
    let _ = writeln!(out, "\npairs ({metric}): {} of {total}", filtered.len());
    for p in &filtered {
        let _ = writeln!(
            out,
            "  {:>5.1} on {:>5.1}  {:>5.2}:1 {:<4}  Lc {:>6.1}{}",
            p.foreground_step,
            p.background_step,
            p.wcag_ratio,
            p.wcag_level.label(),
            p.apca_lc,
            if p.apca_passes { "  pass" } else { "" }
        );
    }

    let _ = writeln!(out, "\nbadges:");
    for ranking in rank_badges(&filtered, config) {
        let steps: Vec<String> = ranking
            .pairs
            .iter()
            .map(|p| format!("{}/{}", p.foreground_step, p.background_step))
            .collect();
        let _ = writeln!(out, "  {:<6} {}", ranking.badge.label, steps.join(", "));
    }

    let _ = writeln!(out, "\nusage:");
    for advice in advise(&colors, scale.target_background, config) {
        let _ = writeln!(out, "  {:>5.1}  {}", advice.step, advice.recommendations.join("; "));
        for warning in &advice.warnings {
            let _ = writeln!(out, "         ! {warning}");
        }
        if !advice.best_pairings.is_empty() {
            let pairings: Vec<String> =
                advice.best_pairings.iter().map(ToString::to_string).collect();
            let _ = writeln!(out, "         pairs with {}", pairings.join(", "));
        }
    }
    out
}

fn render_fix(result: &AutoFixResult) -> String {
    let mut out = String::new();
    for line in &result.improvements {
        let _ = writeln!(out, "- {line}");
    }
    if result.improvements.is_empty() {
        let _ = writeln!(out, "- no changes");
    }
    let m = &result.metrics;
    let _ = writeln!(
        out,
        "\nadjusted {} step(s), targets achieved {} / failed {}, average Lc improvement {:.1}",
        m.lightness_adjustments.len(),
        m.targets_achieved,
        m.targets_failed,
        m.average_lc_improvement
    );
    let steps: Vec<String> = result
        .adjusted_lightness_steps
        .iter()
        .map(|s| format!("{s:.1}"))
        .collect();
    let _ = writeln!(out, "lightness: [{}]", steps.join(", "));
    let _ = writeln!(out, "{}", if result.success { "success" } else { "incomplete" });
    out
}

fn render_presets() -> String {
    let mut out = String::from("APCA presets:\n");
    for name in builtin_preset_names() {
        if let Some(preset) = apca_preset(name) {
            let targets: Vec<String> = preset.targets.iter().map(ApcaTarget::label).collect();
            let _ = writeln!(out, "  {name:<16} {} [{}]", preset.description, targets.join(", "));
        }
    }
    out.push_str("\ncurve presets:\n");
    for name in builtin_curve_names() {
        let _ = writeln!(out, "  {name}");
    }
    out
}

fn run(invocation: Invocation, config: &ContrastConfig) -> Result<String, String> {
    let scale = invocation.scale;
    match invocation.command {
        Command::Help => Ok(USAGE.to_string()),
        Command::Presets => Ok(render_presets()),
        Command::Analyze { threshold, passing } => {
            let threshold = if passing && threshold.is_unbounded() {
                ContrastThreshold::for_mode(scale.contrast_mode, config)
            } else {
                threshold
            };
            Ok(render_analysis(&scale, &threshold, config))
        }
        Command::Recommend { page } => {
            Ok(format!("{}\n", recommend_apca_preset(&scale, &page)))
        }
        Command::Fix { targets, options } => {
            if targets.is_empty() {
                return Err("fix needs --preset or at least one --target".to_string());
            }
            let result = auto_fix(&scale, &config.step_labels, &targets, &options);
            Ok(render_fix(&result))
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let args: Vec<String> = env::args().skip(1).collect();

    let invocation = parse_args(&args).unwrap_or_else(|e| {
        eprintln!("tonal: {e}\n\n{USAGE}");
        process::exit(2);
    });

    log::debug!("{invocation:?}");

    let config = match &invocation.config_path {
        Some(path) => ContrastConfig::load(path).unwrap_or_else(|e| {
            eprintln!("tonal: {e}");
            process::exit(1);
        }),
        None => ContrastConfig::default(),
    };

    match run(invocation, &config) {
        Ok(output) => print!("{output}"),
        Err(e) => {
            eprintln!("tonal: {e}");
            process::exit(1);
        }
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn args(s: &str) -> Vec<String> {
        s.split_whitespace().map(String::from).collect()
    }

    fn parse(s: &str) -> Invocation {
        parse_args(&args(s)).unwrap()
    }

    // ── Argument parsing ──────────────────────────────────────────────────

    #[test]
    fn no_args_is_help() {
        assert_eq!(parse("").command, Command::Help);
    }

    #[test]
    fn scale_flags() {
        let inv = parse("analyze --hue 30 --chroma 0.2 --bg black --mode apca --compensate");
        assert_eq!(inv.scale.hue, 30.0);
        assert_eq!(inv.scale.manual_chroma, 0.2);
        assert_eq!(inv.scale.target_background, TargetBackground::Black);
        assert_eq!(inv.scale.contrast_mode, ContrastMode::FixedApca);
        assert!(inv.scale.chroma_compensation);
    }

    #[test]
    fn curve_flag_sets_curves() {
        let inv = parse("analyze --curve warm-shadows");
        let preset = builtin_curve("warm-shadows").unwrap();
        assert_eq!(inv.scale.hue_curve, preset.hue);
    }

    #[test]
    fn analyze_threshold() {
        let inv = parse("analyze --apca --min 60");
        let Command::Analyze { threshold, .. } = inv.command else {
            panic!("expected analyze");
        };
        assert!(threshold.use_apca);
        assert_eq!(threshold.min_apca, Some(60.0));
    }

    #[test]
    fn fix_targets_and_options() {
        let inv =
            parse("fix --target 75 --target 45:#000:nice --no-preserve-endpoints --tolerance 0.5");
        let Command::Fix { targets, options } = inv.command else {
            panic!("expected fix");
        };
        assert_eq!(targets.len(), 2);
        assert_eq!(targets[0], ApcaTarget::new(75.0, "#FFFFFF", Priority::Must));
        assert_eq!(targets[1], ApcaTarget::new(45.0, "#000", Priority::Nice));
        assert!(!options.preserve_endpoints);
        assert_eq!(options.tolerance, 0.5);
    }

    #[test]
    fn fix_with_preset() {
        let inv = parse("fix --preset ui-white");
        let Command::Fix { targets, .. } = inv.command else {
            panic!("expected fix");
        };
        assert_eq!(targets.len(), 3);
    }

    #[test]
    fn bad_input_is_reported() {
        assert!(parse_args(&args("paint")).is_err());
        assert!(parse_args(&args("analyze --hue")).is_err());
        assert!(parse_args(&args("analyze --hue blue")).is_err());
        assert!(parse_args(&args("analyze --bg purple")).is_err());
        assert!(parse_args(&args("fix --preset nope")).is_err());
        assert!(parse_args(&args("fix --target 75:#zzz")).is_err());
        assert!(parse_args(&args("fix --target 75:#fff:urgent")).is_err());
        assert!(parse_args(&args("analyze --frobnicate")).is_err());
    }

    // ── Running ───────────────────────────────────────────────────────────

    #[test]
    fn recommend_prints_preset_name() {
        let inv = parse("recommend --chroma 0.25");
        assert_eq!(run(inv, &ContrastConfig::default()).unwrap(), "ui-white\n");
        let inv = parse("recommend --chroma 0.02 --page #000000");
        assert_eq!(run(inv, &ContrastConfig::default()).unwrap(), "body-text-black\n");
    }

    #[test]
    fn fix_without_targets_is_an_error() {
        assert!(run(parse("fix"), &ContrastConfig::default()).is_err());
    }

    #[test]
    fn fix_reports_mode_switch() {
        let out = run(parse("fix --target 75"), &ContrastConfig::default()).unwrap();
        assert!(out.contains("contrast mode"));
        assert!(out.contains("lightness: ["));
    }

    #[test]
    fn analyze_lists_every_step() {
        let config = ContrastConfig::default();
        let out = run(parse("analyze"), &config).unwrap();
        assert!(out.contains("pairs (WCAG): 240 of 240"));
        assert!(out.contains("badges:"));
        assert!(out.contains("usage:"));
    }

    #[test]
    fn passing_follows_the_contrast_mode() {
        let config = ContrastConfig::default();
        let all = run(parse("analyze"), &config).unwrap();
        let wcag = run(parse("analyze --passing"), &config).unwrap();
        let apca = run(parse("analyze --passing --mode apca"), &config).unwrap();
        assert!(all.contains("pairs (WCAG): 240 of 240"));
        assert!(!wcag.contains("pairs (WCAG): 240 of 240"));
        assert!(wcag.contains("pairs (WCAG): "));
        assert!(apca.contains("pairs (APCA): "));
    }

    #[test]
    fn explicit_bounds_win_over_passing() {
        let config = ContrastConfig::default();
        let bounded = run(parse("analyze --min 1"), &config).unwrap();
        let both = run(parse("analyze --passing --min 1"), &config).unwrap();
        assert_eq!(both, bounded);
    }

    #[test]
    fn presets_lists_both_catalogs() {
        let out = run(parse("presets"), &ContrastConfig::default()).unwrap();
        assert!(out.contains("strict-white"));
        assert!(out.contains("warm-shadows"));
    }
}
