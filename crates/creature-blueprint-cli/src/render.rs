//! Human-readable rendering of a blueprint.

use std::fmt::{self, Write};

use creature_blueprint::{Blueprint, Stat};

fn format_stat(stat: &Stat) -> String {
    format!("{}/{}", stat.value, stat.max)
}

/// Renders every field, one per line.
pub fn render_text(bp: &Blueprint) -> Result<String, fmt::Error> {
    let mut out = String::new();
    writeln!(out, "=== Blueprint (v{}) ===", bp.version.as_u16())?;
    match &bp.name {
        Some(name) => writeln!(out, "Name: {name:?}")?,
        None => writeln!(out, "Name: (unset)")?,
    }

    if !bp.content_packs.is_empty() {
        writeln!(out, "Content packs: {}", bp.content_packs.len())?;
        for (i, uri) in bp.content_packs.iter().enumerate() {
            writeln!(out, "  [{i}] {uri}")?;
        }
    }

    writeln!(out, "Morphs: {}", bp.morph_references.len())?;
    for (i, morph) in bp.morph_references.iter().enumerate() {
        let active = if i == bp.active_morph_index as usize { " (active)" } else { "" };
        let scale = bp.morph_scales.get(i).copied().unwrap_or_default();
        match morph.content_pack_index {
            Some(pack) => writeln!(out, "  [{i}] {} pack={pack} scale={scale}{active}", morph.id)?,
            None => writeln!(out, "  [{i}] {} scale={scale}{active}", morph.id)?,
        }
    }

    writeln!(out, "Hit points: {}", format_stat(bp.hit_points()))?;
    let stats: Vec<String> = bp.campaign_stats().iter().map(format_stat).collect();
    writeln!(out, "Stats: {}", stats.join(" "))?;

    writeln!(
        out,
        "Torch: {}  Hidden: {}  Flying: {}",
        bp.torch_enabled, bp.explicitly_hidden, bp.flying_enabled
    )?;

    if !bp.slot_overrides.is_empty() {
        writeln!(out, "Slot overrides: {}", bp.slot_overrides.len())?;
        for slot in &bp.slot_overrides {
            writeln!(out, "  {} -> {}", slot.id, slot.index)?;
        }
    }
    if !bp.active_emote_ids.is_empty() {
        writeln!(out, "Active emotes:")?;
        for id in &bp.active_emote_ids {
            writeln!(out, "  {id}")?;
        }
    }

    let reserved_set = bp.reserved0.iter().any(|v| *v != 0)
        || bp.reserved1.iter().any(|v| *v != 0)
        || bp.reserved_flags != 0;
    if reserved_set {
        writeln!(
            out,
            "Reserved: {:?} {:?} flags={:#04x}",
            bp.reserved0, bp.reserved1, bp.reserved_flags
        )?;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use creature_blueprint::SchemaVersion;

    #[test]
    fn test_render_default() {
        let text = render_text(&Blueprint::default()).unwrap();
        assert!(text.starts_with("=== Blueprint (v1) ===\n"));
        assert!(text.contains("Name: (unset)"));
        assert!(text.contains("Morphs: 1"));
        assert!(text.contains("(active)"));
        assert!(!text.contains("Reserved"));
    }

    #[test]
    fn test_render_pack_and_stats() {
        let mut bp = Blueprint::new(SchemaVersion::V2, Default::default());
        bp.name = Some("Meeple".to_string());
        bp.content_packs.push("br:pack".to_string());
        *bp.hit_points_mut() = Stat::new(7.0, 12.0);
        bp.reserved_flags = 0x80;

        let text = render_text(&bp).unwrap();
        assert!(text.contains("Name: \"Meeple\""));
        assert!(text.contains("  [0] br:pack"));
        assert!(text.contains("pack=0"));
        assert!(text.contains("Hit points: 7/12"));
        assert!(text.contains("flags=0x80"));
    }
}
