//! Synthetic monster generation for seeding collections
//!
//! Produces records with the fields `Name`, `Type`, `Level`, `Rarity`,
//! `Damage`, `Health`, `Energy`, `Sanity` and `Timestamp`. Higher ranks are
//! rarer and scale the numeric stats up.

use super::Record;
use chrono::Utc;
use rand::prelude::*;
use rand::rngs::StdRng;
use serde_json::json;

/// Source of records for [`Database::seed_with`](crate::db::Database::seed_with)
pub trait RecordGenerator {
    /// Produce exactly `count` records
    fn generate(&mut self, count: usize) -> Vec<Record>;
}

const MONSTER_TYPES: [(&str, &[&str]); 6] = [
    ("Demonic", &["Imp", "Succubus", "Balor", "Hellhound", "Shadow Fiend", "Pit Fiend"]),
    ("Devilkin", &["Goblin", "Gremlin", "Kobold", "Hobgoblin", "Bugbear", "Redcap"]),
    ("Dragon", &["Wyvern", "Drake", "Wyrm", "Amphithere", "Basilisk", "Lindworm"]),
    ("Elemental", &["Djinn", "Ifrit", "Golem", "Salamander", "Sylph", "Undine"]),
    ("Fey", &["Pixie", "Dryad", "Satyr", "Banshee", "Kelpie", "Will-o'-wisp"]),
    ("Undead", &["Skeleton", "Zombie", "Wraith", "Lich", "Ghoul", "Vampire"]),
];

/// Relative odds of Rank 0 through Rank 5
const RANK_WEIGHTS: [u32; 6] = [32, 16, 8, 4, 2, 1];

const RANK_TOTAL: u32 = {
    let mut total = 0;
    let mut i = 0;
    while i < RANK_WEIGHTS.len() {
        total += RANK_WEIGHTS[i];
        i += 1;
    }
    total
};

/// Die size per rank
const DAMAGE_DIE: [u32; 6] = [4, 6, 8, 10, 12, 20];

const MAX_LEVEL: u32 = 20;

/// Random monster generator
pub struct MonsterGenerator {
    rng: StdRng,
}

impl MonsterGenerator {
    /// Generator seeded from OS entropy
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    /// Deterministic generator, identical output for identical seeds
    /// (apart from `Timestamp`)
    pub fn seeded(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        Self { rng }
    }

    /// Weighted draw over [`RANK_WEIGHTS`]
    fn rank(&mut self) -> usize {
        let mut roll = self.rng.gen_range(0..RANK_TOTAL);
        for (rank, weight) in RANK_WEIGHTS.iter().enumerate() {
            if roll < *weight {
                return rank;
            }
            roll -= weight;
        }
        RANK_WEIGHTS.len() - 1
    }

    /// Generate a single monster record
    pub fn monster(&mut self) -> Record {
        let (monster_type, names) = MONSTER_TYPES[self.rng.gen_range(0..MONSTER_TYPES.len())];
        let name = names.choose(&mut self.rng).copied().unwrap_or(monster_type);
        let level = self.rng.gen_range(1..=MAX_LEVEL);
        let rank = self.rank();
        let scale = f64::from(level) * (rank as f64 + 1.0);

        let dice = (level / 2).max(1);
        let damage = if rank == 0 {
            format!("{}d{}", dice, DAMAGE_DIE[rank])
        } else {
            format!("{}d{}+{}", dice, DAMAGE_DIE[rank], rank)
        };

        let health = round2(scale * self.rng.gen_range(2.0..4.0));
        let energy = round2(scale * self.rng.gen_range(1.0..3.0));
        let sanity = round2(scale * self.rng.gen_range(0.5..2.5));

        let value = json!({
            "Name": name,
            "Type": monster_type,
            "Level": level,
            "Rarity": format!("Rank {}", rank),
            "Damage": damage,
            "Health": health,
            "Energy": energy,
            "Sanity": sanity,
            "Timestamp": Utc::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        });

        match value {
            serde_json::Value::Object(record) => record,
            _ => Record::new(),
        }
    }
}

impl Default for MonsterGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordGenerator for MonsterGenerator {
    fn generate(&mut self, count: usize) -> Vec<Record> {
        (0..count).map(|_| self.monster()).collect()
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIELDS: [&str; 9] = [
        "Name",
        "Type",
        "Level",
        "Rarity",
        "Damage",
        "Health",
        "Energy",
        "Sanity",
        "Timestamp",
    ];

    #[test]
    fn test_generates_requested_count() {
        let mut generator = MonsterGenerator::seeded(7);
        assert_eq!(generator.generate(25).len(), 25);
        assert!(generator.generate(0).is_empty());
    }

    #[test]
    fn test_monster_shape() {
        let mut generator = MonsterGenerator::seeded(42);
        for monster in generator.generate(200) {
            assert_eq!(monster.len(), FIELDS.len());
            for field in FIELDS {
                assert!(monster.contains_key(field), "missing {}", field);
            }

            let level = monster["Level"].as_u64().unwrap();
            assert!((1..=20).contains(&level));

            let rarity = monster["Rarity"].as_str().unwrap();
            assert!(rarity.starts_with("Rank "));

            let monster_type = monster["Type"].as_str().unwrap();
            assert!(MONSTER_TYPES.iter().any(|(t, _)| *t == monster_type));

            assert!(monster["Damage"].as_str().unwrap().contains('d'));
            assert!(monster["Health"].as_f64().unwrap() > 0.0);
        }
    }

    #[test]
    fn test_seeded_generators_agree() {
        let strip = |mut r: Record| {
            r.remove("Timestamp");
            r
        };

        let a: Vec<_> = MonsterGenerator::seeded(9).generate(10).into_iter().map(strip).collect();
        let b: Vec<_> = MonsterGenerator::seeded(9).generate(10).into_iter().map(strip).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_low_ranks_dominate() {
        let mut generator = MonsterGenerator::seeded(1);
        let monsters = generator.generate(2000);
        let count = |rank: &str| monsters.iter().filter(|m| m["Rarity"] == rank).count();
        assert!(count("Rank 0") > count("Rank 5"));
    }

    #[test]
    fn test_rank_draw_covers_every_rank() {
        let mut generator = MonsterGenerator::seeded(3);
        let mut seen = [0usize; RANK_WEIGHTS.len()];
        for _ in 0..10_000 {
            seen[generator.rank()] += 1;
        }

        assert_eq!(RANK_TOTAL, 63);
        assert!(seen.iter().all(|&n| n > 0), "{:?}", seen);
        assert!(seen.windows(2).all(|pair| pair[0] > pair[1]), "{:?}", seen);
    }
}
