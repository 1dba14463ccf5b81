//! Wheel configuration: the boundary where settings become a validated round

use serde::{Deserialize, Serialize};

use bw_core::{BwResult, ConfigError, DEFAULT_BANK, GameVariant, MAX_BETS};

use crate::bet::Bet;
use crate::prize::{CLASSIC_PRIZES, PrizeTable};
use crate::probability::ProbabilityModel;
use crate::round::GameRound;

/// How the selection weights of a tweaked wheel are produced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "scheme", content = "weights", rename_all = "snake_case")]
pub enum WeightScheme {
    /// 1/n on every slot
    #[default]
    Uniform,
    /// Low prizes heavier (house-favourable)
    TieredByPrize,
    /// Explicit weights, e.g. hand-edited ones
    Custom(Vec<f64>),
}

impl WeightScheme {
    /// Produce the model for a given prize table
    pub fn resolve(&self, prizes: &PrizeTable) -> Result<ProbabilityModel, ConfigError> {
        let model = match self {
            Self::Uniform => ProbabilityModel::uniform(prizes.len()),
            Self::TieredByPrize => ProbabilityModel::tiered_by_prize(prizes),
            Self::Custom(weights) => ProbabilityModel::from_weights(weights.clone())?,
        };
        model.validate(prizes.len())?;
        Ok(model)
    }
}

/// Parsing limits for untrusted documents
#[derive(Debug, Clone)]
pub struct ConfigLimits {
    pub max_document_bytes: usize,
    pub max_bets: usize,
}

impl Default for ConfigLimits {
    fn default() -> Self {
        Self {
            max_document_bytes: 64 * 1024,
            max_bets: MAX_BETS,
        }
    }
}

/// Complete description of a wheel and its standing bets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WheelConfig {
    /// Fair wheels always use uniform weights
    pub variant: GameVariant,
    pub prizes: Vec<u64>,
    pub weights: WeightScheme,
    pub initial_bank: i64,
    pub bets: Vec<Bet>,
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self {
            variant: GameVariant::Fair,
            prizes: CLASSIC_PRIZES.to_vec(),
            weights: WeightScheme::Uniform,
            initial_bank: DEFAULT_BANK,
            bets: Vec::new(),
        }
    }
}

impl WheelConfig {
    /// Fair wheel over the given prizes
    pub fn fair(prizes: &PrizeTable) -> Self {
        Self {
            prizes: prizes.as_slice().to_vec(),
            ..Default::default()
        }
    }

    /// Tweaked wheel over the given prizes
    pub fn tweaked(prizes: &PrizeTable, weights: WeightScheme) -> Self {
        Self {
            variant: GameVariant::Tweaked,
            prizes: prizes.as_slice().to_vec(),
            weights,
            ..Default::default()
        }
    }

    /// Builder: set initial bank
    pub fn with_bank(mut self, bank: i64) -> Self {
        self.initial_bank = bank;
        self
    }

    /// Builder: add a standing bet
    pub fn with_bet(mut self, bet: Bet) -> Self {
        self.bets.push(bet);
        self
    }

    pub fn slot_count(&self) -> usize {
        self.prizes.len()
    }

    /// Validate everything and construct the round with its bets registered
    pub fn build(&self) -> BwResult<GameRound> {
        let prizes = PrizeTable::new(self.prizes.clone())?;
        let mut round = match self.variant {
            GameVariant::Fair => {
                if self.weights != WeightScheme::Uniform {
                    log::warn!("Fair wheel ignores configured weight scheme");
                }
                GameRound::fair(prizes, self.initial_bank)?
            }
            GameVariant::Tweaked => {
                let model = self.weights.resolve(&prizes)?;
                GameRound::tweaked(prizes, model, self.initial_bank)?
            }
        };
        for bet in &self.bets {
            round.register_bet(*bet)?;
        }
        Ok(round)
    }

    /// Parse a JSON document with default limits
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Self::from_json_with_limits(json, &ConfigLimits::default())
    }

    pub fn from_json_with_limits(json: &str, limits: &ConfigLimits) -> Result<Self, ConfigError> {
        check_size(json, limits)?;
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.check_limits(limits)?;
        Ok(config)
    }

    /// Parse a YAML document with default limits
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let limits = ConfigLimits::default();
        check_size(yaml, &limits)?;
        let config: Self =
            serde_yml::from_str(yaml).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.check_limits(&limits)?;
        Ok(config)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".into())
    }

    fn check_limits(&self, limits: &ConfigLimits) -> Result<(), ConfigError> {
        if self.bets.len() > limits.max_bets {
            return Err(ConfigError::Limit(format!(
                "Too many bets: {} > {}",
                self.bets.len(),
                limits.max_bets
            )));
        }
        Ok(())
    }
}

fn check_size(doc: &str, limits: &ConfigLimits) -> Result<(), ConfigError> {
    if doc.len() > limits.max_document_bytes {
        return Err(ConfigError::Limit(format!(
            "Document too large: {} > {} bytes",
            doc.len(),
            limits.max_document_bytes
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bw_core::{BetError, BwError};

    #[test]
    fn test_default_builds_classic_fair() {
        let round = WheelConfig::default().build().unwrap();
        assert_eq!(round.variant(), GameVariant::Fair);
        assert_eq!(round.prizes(), &PrizeTable::classic());
        assert_eq!(round.bank_balance(), DEFAULT_BANK);
    }

    #[test]
    fn test_tweaked_tiered() {
        let config = WheelConfig::tweaked(&PrizeTable::classic(), WeightScheme::TieredByPrize)
            .with_bank(5_000)
            .with_bet(Bet::new(1, 250, 0));
        let round = config.build().unwrap();
        assert_eq!(round.variant(), GameVariant::Tweaked);
        assert_eq!(round.bank_balance(), 5_000);
        assert_eq!(round.bets().len(), 1);
        assert!(round.model().weight(4) > round.model().weight(0));
    }

    #[test]
    fn test_fair_ignores_scheme() {
        let config = WheelConfig {
            weights: WeightScheme::TieredByPrize,
            ..Default::default()
        };
        let round = config.build().unwrap();
        assert_eq!(round.model(), &ProbabilityModel::uniform(12));
    }

    #[test]
    fn test_build_rejects_bad_bet() {
        let config = WheelConfig::default().with_bet(Bet::new(1, 250, 12));
        assert!(matches!(
            config.build(),
            Err(BwError::Bet(BetError::SlotOutOfRange { .. }))
        ));
    }

    #[test]
    fn test_build_rejects_unnormalised_custom() {
        let config = WheelConfig::tweaked(
            &PrizeTable::classic(),
            WeightScheme::Custom(vec![0.1; 12]),
        );
        assert!(matches!(
            config.build(),
            Err(BwError::Config(ConfigError::WeightSum { .. }))
        ));
    }

    #[test]
    fn test_build_rejects_negative_bank() {
        let config = WheelConfig::default().with_bank(-1);
        assert_eq!(
            config.build().unwrap_err(),
            BwError::Config(ConfigError::NegativeBank { bank: -1 })
        );
        assert!(WheelConfig::default().with_bank(0).build().is_ok());
    }

    #[test]
    fn test_parse_json() {
        let json = r#"{
            "variant": "tweaked",
            "weights": { "scheme": "tiered_by_prize" },
            "initial_bank": 20000,
            "bets": [ { "player": 7, "amount": 100, "slot": 4 } ]
        }"#;
        let config = WheelConfig::from_json(json).unwrap();
        assert_eq!(config.variant, GameVariant::Tweaked);
        assert_eq!(config.prizes, CLASSIC_PRIZES.to_vec());
        assert_eq!(config.bets, vec![Bet::new(7, 100, 4)]);

        let round = config.build().unwrap();
        assert_eq!(round.bank_balance(), 20_000);
    }

    #[test]
    fn test_parse_yaml() {
        let yaml = "variant: fair\nprizes: [20, 50, 100, 200, 500, 750, 1000, 20, 50, 100, 200, 500, 750]\n";
        let config = WheelConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.slot_count(), 13);
        assert_eq!(config.build().unwrap().slot_count(), 13);
    }

    #[test]
    fn test_json_round_trip_custom() {
        let mut weights = vec![0.0; 12];
        weights[0] = 0.5;
        weights[1] = 0.5;
        let config = WheelConfig::tweaked(&PrizeTable::classic(), WeightScheme::Custom(weights));
        let back = WheelConfig::from_json(&config.to_json()).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_limits() {
        let limits = ConfigLimits {
            max_document_bytes: 16,
            max_bets: 1,
        };
        assert!(matches!(
            WheelConfig::from_json_with_limits(&"x".repeat(17), &limits),
            Err(ConfigError::Limit(_))
        ));
        let many = WheelConfig::default()
            .with_bet(Bet::new(1, 1, 0))
            .with_bet(Bet::new(1, 1, 1))
            .to_json();
        let limits = ConfigLimits {
            max_bets: 1,
            ..Default::default()
        };
        assert!(matches!(
            WheelConfig::from_json_with_limits(&many, &limits),
            Err(ConfigError::Limit(_))
        ));
        assert!(matches!(WheelConfig::from_json("{ nope"), Err(ConfigError::Parse(_))));
    }
}
