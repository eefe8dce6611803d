//! Reference data for a fresh catalog.
//!
//! Everything is upserted on its unique key, so seeding an already seeded
//! catalog changes nothing.

use crate::catalog_store::CatalogStore;
use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

pub const FORMATS: &[(&str, &str)] = &[
    ("Vinyl", "12\", 10\", 7\" vinyl records"),
    ("CD", "Compact Disc"),
    ("Cassette", "Cassette tape"),
    ("Digital", "Digital files (MP3, FLAC, etc.)"),
    ("DVD", "Digital Versatile Disc"),
    ("Blu-ray", "Blu-ray Disc"),
    ("8-Track", "8-Track cartridge"),
    ("MiniDisc", "MiniDisc"),
];

/// (name, ISO 3166-1 alpha-2)
pub const COUNTRIES: &[(&str, &str)] = &[
    ("United States", "US"),
    ("United Kingdom", "GB"),
    ("Germany", "DE"),
    ("France", "FR"),
    ("Japan", "JP"),
    ("Canada", "CA"),
    ("Australia", "AU"),
    ("Netherlands", "NL"),
    ("Italy", "IT"),
    ("Spain", "ES"),
    ("Sweden", "SE"),
    ("Brazil", "BR"),
    ("Belgium", "BE"),
    ("Switzerland", "CH"),
    ("Austria", "AT"),
    ("Denmark", "DK"),
    ("Norway", "NO"),
    ("Finland", "FI"),
    ("Poland", "PL"),
    ("Russia", "RU"),
];

pub const GENRES: &[&str] = &[
    "Electronic",
    "Rock",
    "Hip Hop",
    "Jazz",
    "Classical",
    "Reggae",
    "Blues",
    "Country",
    "Folk",
    "Latin",
    "R&B",
    "Soul",
    "Funk",
    "Pop",
    "Metal",
    "Punk",
    "World",
    "Experimental",
    "Ambient",
    "Gospel",
];

pub const STYLES: &[&str] = &[
    // Electronic
    "House",
    "Techno",
    "Trance",
    "Drum & Bass",
    "Dubstep",
    "Ambient",
    "IDM",
    "Breakbeat",
    "Downtempo",
    "Garage",
    "Jungle",
    "Hardstyle",
    "Tech House",
    "Deep House",
    "Progressive House",
    // Rock
    "Alternative Rock",
    "Indie Rock",
    "Progressive Rock",
    "Psychedelic Rock",
    "Hard Rock",
    "Classic Rock",
    "Punk Rock",
    "Post-Rock",
    "Garage Rock",
    "Grunge",
    "Shoegaze",
    // Hip Hop
    "East Coast Hip Hop",
    "West Coast Hip Hop",
    "Trap",
    "Boom Bap",
    "Conscious Hip Hop",
    "Gangsta Rap",
    "Old School Hip Hop",
    "Underground Hip Hop",
    // Jazz
    "Bebop",
    "Swing",
    "Cool Jazz",
    "Free Jazz",
    "Fusion",
    "Latin Jazz",
    "Smooth Jazz",
    "Modern Jazz",
    "Hard Bop",
    "Modal Jazz",
    // Metal
    "Heavy Metal",
    "Thrash Metal",
    "Death Metal",
    "Black Metal",
    "Doom Metal",
    "Power Metal",
    "Progressive Metal",
    "Nu Metal",
    "Metalcore",
    // Other
    "Neo-Soul",
    "Contemporary R&B",
    "Disco",
    "Synth-pop",
    "New Wave",
    "Post-Punk",
    "Industrial",
    "Noise",
    "Drone",
    "Field Recording",
    "Musique Concrète",
];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SeedStats {
    pub formats: usize,
    pub countries: usize,
    pub genres: usize,
    pub styles: usize,
}

pub fn seed_reference_data(store: &dyn CatalogStore) -> Result<SeedStats> {
    let mut stats = SeedStats::default();

    info!("Seeding formats...");
    for &(name, description) in FORMATS {
        store
            .upsert_format(name, Some(description))
            .with_context(|| format!("Failed to seed format {}", name))?;
        stats.formats += 1;
    }

    info!("Seeding countries...");
    for &(name, code) in COUNTRIES {
        store
            .upsert_country(name, code)
            .with_context(|| format!("Failed to seed country {}", code))?;
        stats.countries += 1;
    }

    info!("Seeding genres...");
    for name in GENRES {
        store
            .upsert_genre(name)
            .with_context(|| format!("Failed to seed genre {}", name))?;
        stats.genres += 1;
    }

    info!("Seeding styles...");
    for name in STYLES {
        store
            .upsert_style(name)
            .with_context(|| format!("Failed to seed style {}", name))?;
        stats.styles += 1;
    }

    Ok(stats)
}
