//! Plain-text battle report

use std::fmt::Write;

use espy_battle::{BattleSummary, CombatantSummary};

use crate::ReplayMetadata;

const RULE: &str = "============================================================";
const SUBRULE: &str = "----------------------------------------";

/// Render the summary as a human-readable report, one section per team
pub fn render_text(metadata: &ReplayMetadata, summary: &BattleSummary) -> String {
    let mut out = String::new();

    // writeln! into a String cannot fail
    let _ = write_replay_info(&mut out, metadata, summary);
    for (side, members) in &summary.teams {
        let _ = writeln!(out, "{}\nTEAM {}\n{}", RULE, side.as_str().to_uppercase(), RULE);
        for nickname in members {
            if let Some(combatant) = summary.combatant(*side, nickname) {
                let _ = write_combatant(&mut out, combatant);
            }
        }
        out.push('\n');
    }

    out
}

fn write_replay_info(
    out: &mut String,
    metadata: &ReplayMetadata,
    summary: &BattleSummary,
) -> std::fmt::Result {
    let format = metadata.format.as_ref().or(summary.format.as_ref());
    let players: Vec<&str> = if metadata.players.is_empty() {
        summary.players.iter().map(|p| p.username.as_str()).collect()
    } else {
        metadata.players.iter().map(String::as_str).collect()
    };

    if format.is_none() && players.is_empty() && metadata.is_empty() {
        return Ok(());
    }

    writeln!(out, "{}\nREPLAY INFORMATION\n{}", RULE, RULE)?;
    if let Some(format) = format {
        writeln!(out, "Format: {}", format)?;
    }
    if !players.is_empty() {
        writeln!(out, "Players: {}", players.join(", "))?;
    }
    if let Some(rating) = metadata.rating.filter(|r| *r != 0) {
        writeln!(out, "Rating: {}", rating)?;
    }
    if summary.turns > 0 {
        writeln!(out, "Turns: {}", summary.turns)?;
    }
    if let Some(winner) = &summary.winner {
        writeln!(out, "Winner: {}", winner)?;
    } else if summary.tie {
        writeln!(out, "Result: Tie")?;
    }
    writeln!(out)
}

fn write_combatant(out: &mut String, c: &CombatantSummary) -> std::fmt::Result {
    writeln!(out, "\n{} ({}) - Level {}", c.name, c.species, c.level)?;
    writeln!(out, "{}", SUBRULE)?;

    if let Some(ability) = &c.ability {
        writeln!(out, "  Ability: {}", ability)?;
    }
    if let Some(item) = &c.item {
        writeln!(out, "  Item: {}", item)?;
    }
    if !c.moves.is_empty() {
        writeln!(out, "  Moves: {}", c.moves.join(", "))?;
    }

    writeln!(out, "  Stats:")?;
    writeln!(
        out,
        "    K/D Ratio: {:.2} ({}/{})",
        c.kd_ratio, c.knockouts, c.deaths
    )?;
    writeln!(out, "    Damage Dealt: {}", c.damage_dealt)?;
    writeln!(out, "    Damage Taken: {}", c.damage_taken)?;
    if !c.move_kills.is_empty() {
        let kills: Vec<String> = c
            .move_kills
            .iter()
            .map(|(name, count)| format!("{} x{}", name, count))
            .collect();
        writeln!(out, "    Move Kills: {}", kills.join(", "))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use espy_battle::analyze_log;

    use super::*;

    const LOG: &str = "\
|player|p1|Alice|1|
|player|p2|Bob|2|
|tier|[Gen 9] OU
|switch|p1a: Sparky|Pikachu, L50|150/150
|switch|p2a: Charizard|Charizard, L50|200/200
|-item|p1a: Sparky|Light Ball
|turn|1
|move|p1a: Sparky|Thunderbolt|p2a: Charizard
|-damage|p2a: Charizard|0 fnt
|faint|p2a: Charizard
|win|Alice
";

    #[test]
    fn test_render_report() {
        let summary = analyze_log(LOG);
        let metadata = ReplayMetadata {
            rating: Some(1500),
            ..Default::default()
        };
        let text = render_text(&metadata, &summary);

        assert!(text.starts_with(RULE));
        assert!(text.contains("REPLAY INFORMATION"));
        assert!(text.contains("Format: [Gen 9] OU\n"));
        assert!(text.contains("Players: Alice, Bob\n"));
        assert!(text.contains("Rating: 1500\n"));
        assert!(text.contains("Winner: Alice\n"));
        assert!(text.contains("TEAM P1"));
        assert!(text.contains("TEAM P2"));
        assert!(text.contains("Sparky (Pikachu) - Level 50\n"));
        assert!(text.contains("  Item: Light Ball\n"));
        assert!(text.contains("    K/D Ratio: 1.00 (1/0)\n"));
        assert!(text.contains("    Damage Dealt: 200\n"));
        assert!(text.contains("    Move Kills: Thunderbolt x1\n"));
        assert!(text.contains("    K/D Ratio: 0.00 (0/1)\n"));

        let p1 = text.find("TEAM P1").unwrap();
        let p2 = text.find("TEAM P2").unwrap();
        let sparky = text.find("Sparky (Pikachu)").unwrap();
        assert!(p1 < sparky && sparky < p2);
    }

    #[test]
    fn test_render_without_metadata() {
        let summary = analyze_log("|switch|p1a: Eevee|Eevee|100/100\n");
        let text = render_text(&ReplayMetadata::default(), &summary);

        assert!(!text.contains("REPLAY INFORMATION"));
        assert!(text.contains("Eevee (Eevee) - Level 100\n"));
        assert!(text.contains("TEAM P2"));
    }
}
