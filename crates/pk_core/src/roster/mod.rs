//! Player cards and shooter attributes.
//!
//! Stats are derived from the overall rating and position; only
//! speed/control/curve are ever read by the shot model.

use serde::{Deserialize, Serialize};

use crate::collaborators::RosterProvider;
use crate::error::{CoreError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Position {
    GK,
    CB,
    LB,
    RB,
    CDM,
    CM,
    CAM,
    LM,
    RM,
    LW,
    RW,
    ST,
    CF,
}

impl Position {
    pub fn full_name(self) -> &'static str {
        match self {
            Position::GK => "Goalkeeper",
            Position::CB => "Center Back",
            Position::LB => "Left Back",
            Position::RB => "Right Back",
            Position::CDM => "Defensive Midfielder",
            Position::CM => "Central Midfielder",
            Position::CAM => "Attacking Midfielder",
            Position::LM => "Left Midfielder",
            Position::RM => "Right Midfielder",
            Position::LW => "Left Winger",
            Position::RW => "Right Winger",
            Position::ST => "Striker",
            Position::CF => "Center Forward",
        }
    }

    pub fn is_goalkeeper(self) -> bool {
        self == Position::GK
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerCard {
    pub id: u32,
    pub name: String,
    pub rating: u8,
    #[serde(default)]
    pub nation: String,
    pub position: Position,
}

impl PlayerCard {
    pub fn new(id: u32, name: &str, rating: u8, nation: &str, position: Position) -> Self {
        Self { id, name: name.to_string(), rating, nation: nation.to_string(), position }
    }

    pub fn stats(&self) -> PlayerStats {
        PlayerStats::from_rating(self.rating, self.position)
    }
}

/// Card stats on the 50..=99 scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub shooting: u8,
    pub power: u8,
    pub diving: u8,
    pub reflexes: u8,
    /// Feeds shot speed
    pub speed: u8,
    /// Feeds shot accuracy
    pub control: u8,
    pub curve: u8,
}

const STAT_MIN: i32 = 50;
const STAT_MAX: i32 = 99;

fn scale(v: i32) -> i32 {
    v.clamp(STAT_MIN, STAT_MAX)
}

impl PlayerStats {
    pub fn from_rating(rating: u8, position: Position) -> Self {
        let base = (i32::from(rating) - 10).max(STAT_MIN);

        // (shooting, power, diving, reflexes, speed, control, curve)
        let (mut shooting, mut power, diving, reflexes, mut speed, mut control, mut curve) =
            if position.is_goalkeeper() {
                (
                    scale(base - 30),
                    scale(base - 10),
                    scale(base + 15),
                    scale(base + 17),
                    scale(base - 20),
                    scale(base - 20),
                    scale(base - 20),
                )
            } else {
                (
                    scale(base + 10),
                    scale(base + 10),
                    scale(base - 40),
                    scale(base - 30),
                    scale(base + 5),
                    scale(base + 15),
                    scale(base + 5),
                )
            };

        // Positional bonuses on top of the clamped base
        match position {
            Position::ST | Position::CF => shooting += 10,
            Position::LW | Position::RW => {
                speed += 8;
                curve += 8;
            }
            Position::CAM => {
                control += 8;
                curve += 8;
            }
            Position::CM => control += 8,
            Position::LM | Position::RM => curve += 8,
            Position::CB => {
                shooting -= 10;
                power += 5;
            }
            _ => {}
        }

        let to_stat = |v: i32| scale(v) as u8;
        Self {
            shooting: to_stat(shooting),
            power: to_stat(power),
            diving: to_stat(diving),
            reflexes: to_stat(reflexes),
            speed: to_stat(speed),
            control: to_stat(control),
            curve: to_stat(curve),
        }
    }
}

/// What the shot model reads about the taker (0..100, 50 = neutral)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShooterAttributes {
    pub speed: f32,
    pub control: f32,
    pub curve: f32,
}

impl Default for ShooterAttributes {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

impl ShooterAttributes {
    pub const NEUTRAL: Self = Self { speed: 50.0, control: 50.0, curve: 50.0 };

    /// Clamp to 0..=100; non-finite values become neutral
    pub fn sanitized(&self) -> Self {
        let fix = |v: f32| if v.is_finite() { v.clamp(0.0, 100.0) } else { 50.0 };
        Self { speed: fix(self.speed), control: fix(self.control), curve: fix(self.curve) }
    }
}

impl From<&PlayerStats> for ShooterAttributes {
    fn from(stats: &PlayerStats) -> Self {
        Self {
            speed: f32::from(stats.speed),
            control: f32::from(stats.control),
            curve: f32::from(stats.curve),
        }
    }
}

/// Ordered penalty takers; taker `n` shoots in round `n`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Lineup {
    pub takers: Vec<PlayerCard>,
}

impl Lineup {
    pub fn new(takers: Vec<PlayerCard>) -> Self {
        Self { takers }
    }

    /// Default squad: Mbappé, Haaland, Messi, Courtois, van Dijk
    pub fn default_squad() -> Self {
        let takers = DEFAULT_SQUAD_IDS.iter().filter_map(|id| find_card(*id)).collect();
        Self { takers }
    }

    /// Lineup from catalog ids; unknown ids are skipped
    pub fn from_ids(ids: &[u32]) -> Self {
        Self { takers: ids.iter().filter_map(|id| find_card(*id)).collect() }
    }

    /// A match needs one taker per round
    pub fn validate(&self, rounds: u32) -> Result<()> {
        let expected = rounds as usize;
        if self.takers.len() != expected {
            return Err(CoreError::InvalidLineup { expected, found: self.takers.len() });
        }
        Ok(())
    }

    pub fn taker(&self, round: u32) -> Option<&PlayerCard> {
        let index = usize::try_from(round).ok()?.checked_sub(1)?;
        self.takers.get(index)
    }
}

impl RosterProvider for Lineup {
    fn shooter_attributes(&self, round: u32) -> Option<ShooterAttributes> {
        self.taker(round).map(|card| ShooterAttributes::from(&card.stats()))
    }
}

pub const DEFAULT_SQUAD_IDS: [u32; 5] = [1, 3, 6, 9, 21];

/// Built-in card catalog (top tiers only)
pub fn catalog() -> Vec<PlayerCard> {
    use Position::*;
    [
        (1, "Kylian Mbappé", 91, "fr", ST),
        (2, "Alexia Putellas", 91, "es", CM),
        (3, "Erling Haaland", 91, "no", ST),
        (4, "Kevin De Bruyne", 91, "be", CM),
        (5, "Aitana Bonmatí", 90, "es", CM),
        (6, "Lionel Messi", 90, "ar", CF),
        (7, "Sam Kerr", 90, "au", ST),
        (8, "Karim Benzema", 90, "fr", CF),
        (9, "Thibaut Courtois", 90, "be", GK),
        (10, "Harry Kane", 90, "gb-eng", ST),
        (11, "Caroline Hansen", 90, "no", RW),
        (12, "Robert Lewandowski", 90, "pl", ST),
        (13, "Mohamed Salah", 89, "eg", RW),
        (14, "Kadidiatou Diani", 89, "fr", RW),
        (15, "Mapi León", 89, "es", CB),
        (16, "Rúben Dias", 89, "pt", CB),
        (17, "Vini Jr.", 89, "br", LW),
        (18, "Rodri", 89, "es", CDM),
        (19, "Neymar Jr", 89, "br", LW),
        (20, "Marc-André ter Stegen", 89, "de", GK),
        (21, "Virgil van Dijk", 89, "nl", CB),
        (22, "Alisson", 89, "br", GK),
        (30, "Bruno Fernandes", 88, "pt", CAM),
        (35, "Martin Ødegaard", 87, "no", CAM),
    ]
    .into_iter()
    .map(|(id, name, rating, nation, pos)| PlayerCard::new(id, name, rating, nation, pos))
    .collect()
}

pub fn find_card(id: u32) -> Option<PlayerCard> {
    catalog().into_iter().find(|card| card.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_striker_stats() {
        // base 81
        let stats = PlayerStats::from_rating(91, Position::ST);
        assert_eq!(stats.shooting, 99);
        assert_eq!(stats.power, 91);
        assert_eq!(stats.speed, 86);
        assert_eq!(stats.control, 96);
        assert_eq!(stats.curve, 86);
        assert_eq!(stats.diving, 50);
        assert_eq!(stats.reflexes, 51);
    }

    #[test]
    fn test_goalkeeper_stats() {
        // base 80
        let stats = PlayerStats::from_rating(90, Position::GK);
        assert_eq!(stats.diving, 95);
        assert_eq!(stats.reflexes, 97);
        assert_eq!(stats.shooting, 50);
        assert_eq!(stats.power, 70);
        assert_eq!(stats.speed, 60);
        assert_eq!(stats.control, 60);
        assert_eq!(stats.curve, 60);
    }

    #[test]
    fn test_positional_bonuses() {
        // base 79
        let cb = PlayerStats::from_rating(89, Position::CB);
        assert_eq!(cb.shooting, 79);
        assert_eq!(cb.power, 94);

        let rw = PlayerStats::from_rating(89, Position::RW);
        assert_eq!(rw.speed, 92);
        assert_eq!(rw.curve, 92);

        let cam = PlayerStats::from_rating(88, Position::CAM);
        assert_eq!(cam.control, 99);
    }

    #[test]
    fn test_low_rating_floors_at_fifty() {
        let stats = PlayerStats::from_rating(40, Position::ST);
        assert_eq!(stats.speed, 55);
        assert!(stats.diving >= 50);
    }

    #[test]
    fn test_default_squad_order() {
        let squad = Lineup::default_squad();
        let names: Vec<_> = squad.takers.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(
            names,
            [
                "Kylian Mbappé",
                "Erling Haaland",
                "Lionel Messi",
                "Thibaut Courtois",
                "Virgil van Dijk"
            ]
        );
        assert!(squad.validate(5).is_ok());
    }

    #[test]
    fn test_lineup_validate_counts_takers() {
        let lineup = Lineup::from_ids(&[1, 3, 9999]);
        assert!(matches!(
            lineup.validate(5),
            Err(CoreError::InvalidLineup { expected: 5, found: 2 })
        ));
    }

    #[test]
    fn test_roster_provider_indexes_by_round() {
        let squad = Lineup::default_squad();
        let messi = squad.shooter_attributes(3).unwrap();
        assert_eq!(messi, ShooterAttributes::from(&PlayerStats::from_rating(90, Position::CF)));
        assert!(squad.shooter_attributes(0).is_none());
        assert!(squad.shooter_attributes(6).is_none());
    }

    #[test]
    fn test_sanitized_attributes() {
        let attrs = ShooterAttributes { speed: 150.0, control: f32::NAN, curve: -1.0 };
        let fixed = attrs.sanitized();
        assert_eq!(fixed, ShooterAttributes { speed: 100.0, control: 50.0, curve: 0.0 });
    }

    #[test]
    fn test_card_json_uses_position_names() {
        let card = find_card(9).unwrap();
        let json = serde_json::to_string(&card).unwrap();
        assert!(json.contains("\"GK\""));
        let back: PlayerCard = serde_json::from_str(&json).unwrap();
        assert_eq!(back, card);
    }
}
