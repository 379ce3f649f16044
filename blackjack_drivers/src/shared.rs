use anyhow::{bail, Context};
use blackjack::policy::{
    Classifier, ClassifierEntry, DecisionPolicy, DecisionSource, TableClassifier,
};
use blackjack::simulation::campaign::Campaign;
use blackjack::simulation::player::PlayerState;
use serde::{Deserialize, Serialize};
use std::fs;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub rule: ConfigRule,
    pub campaign: ConfigCampaign,
}

impl Config {
    /// Builds a ready to run campaign from the whole config.
    pub fn build_campaign(&self) -> anyhow::Result<Campaign> {
        let rule: blackjack::Rule = self.rule.clone().try_into()?;
        let players = self
            .campaign
            .seats
            .iter()
            .enumerate()
            .map(|(seat, config_seat)| {
                TryInto::<PlayerState>::try_into(config_seat.clone())
                    .with_context(|| format!("invalid seat {}", seat))
            })
            .collect::<anyhow::Result<Vec<PlayerState>>>()?;
        Ok(Campaign::new(&rule, players, self.campaign.seed)?)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigRule {
    pub number_of_decks: u8,
    pub counting_system: String,
    pub european_rules: bool,
    pub split_cap: u8,
    pub reshuffle_threshold: u16,
    pub dealer_trials: u32,
}

impl Default for ConfigRule {
    fn default() -> Self {
        let rule = blackjack::Rule::default();
        ConfigRule {
            number_of_decks: rule.number_of_decks,
            counting_system: rule.counting_system.to_string(),
            european_rules: rule.european_rules,
            split_cap: rule.split_cap,
            reshuffle_threshold: rule.reshuffle_threshold,
            dealer_trials: rule.dealer_trials,
        }
    }
}

impl TryInto<blackjack::Rule> for ConfigRule {
    type Error = anyhow::Error;

    fn try_into(self) -> Result<blackjack::Rule, Self::Error> {
        let blackjack_rule = blackjack::Rule {
            number_of_decks: self.number_of_decks,
            counting_system: self
                .counting_system
                .parse::<blackjack::CountingSystem>()
                .with_context(|| format!("unknown counting system {}", self.counting_system))?,
            european_rules: self.european_rules,
            split_cap: self.split_cap,
            reshuffle_threshold: self.reshuffle_threshold,
            dealer_trials: self.dealer_trials,
        };
        blackjack_rule.validate()?;

        Ok(blackjack_rule)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigCampaign {
    #[serde(default = "default_number_of_rounds")]
    pub number_of_rounds: u32,
    #[serde(default)]
    pub seed: Option<u64>,
    pub seats: Vec<ConfigSeat>,
}

fn default_number_of_rounds() -> u32 {
    1000
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigSeat {
    #[serde(default = "default_skill_level")]
    pub skill_level: f64,
    #[serde(default = "default_starting_bankroll")]
    pub starting_bankroll: f64,
    #[serde(default = "default_base_bet")]
    pub base_bet: f64,
    #[serde(default)]
    pub classifier: Option<ConfigClassifier>,
}

fn default_skill_level() -> f64 {
    1.0
}

fn default_starting_bankroll() -> f64 {
    1000.0
}

fn default_base_bet() -> f64 {
    10.0
}

impl TryInto<PlayerState> for ConfigSeat {
    type Error = anyhow::Error;

    fn try_into(self) -> Result<PlayerState, Self::Error> {
        let source = match self.classifier {
            None => DecisionSource::Strategy,
            Some(config_classifier) => {
                let weight = config_classifier.weight;
                let classifier: Box<dyn Classifier> =
                    Box::new(config_classifier.try_into_classifier()?);
                match weight {
                    Some(weight) => DecisionSource::Blend { classifier, weight },
                    None => DecisionSource::Classifier(classifier),
                }
            }
        };
        let policy = DecisionPolicy::new(self.skill_level, source)?;
        Ok(PlayerState::new(
            self.starting_bankroll,
            self.base_bet,
            policy,
        )?)
    }
}

/// A lookup classifier. Without a weight it is consulted for half of the
/// skilled decisions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigClassifier {
    #[serde(default)]
    pub weight: Option<f64>,
    pub entries: Vec<ConfigClassifierEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigClassifierEntry {
    pub hand_value: u32,
    pub up_card_value: u8,
    #[serde(default)]
    pub min_true_count: Option<f64>,
    pub decision: String,
}

impl ConfigClassifier {
    fn try_into_classifier(self) -> anyhow::Result<TableClassifier> {
        if self.entries.is_empty() {
            bail!("a classifier needs at least one entry");
        }
        let entries = self
            .entries
            .into_iter()
            .map(|entry| {
                Ok(ClassifierEntry {
                    hand_value: entry.hand_value,
                    up_card_value: entry.up_card_value,
                    min_true_count: entry.min_true_count,
                    decision: entry
                        .decision
                        .parse::<blackjack::Decision>()
                        .with_context(|| format!("unknown decision {}", entry.decision))?,
                })
            })
            .collect::<anyhow::Result<Vec<_>>>()?;
        Ok(TableClassifier::new(entries))
    }
}

pub fn parse_config(content: &str) -> anyhow::Result<Config> {
    Ok(serde_yaml::from_str(content)?)
}

/// Reads the content of a given config file and parses it to a Config.
pub fn parse_config_from_file(filename: &str) -> anyhow::Result<Config> {
    let file_content =
        fs::read_to_string(filename).with_context(|| format!("cannot read {}", filename))?;
    parse_config(&file_content).with_context(|| format!("cannot parse {}", filename))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TYPICAL_CONFIG: &str = r#"
rule:
  number_of_decks: 2
  counting_system: Omega II
  split_cap: 3
  dealer_trials: 200
campaign:
  number_of_rounds: 20
  seed: 42
  seats:
    - skill_level: 0.8
      base_bet: 5
    - skill_level: 1.0
      starting_bankroll: 500
      classifier:
        weight: 0.25
        entries:
          - hand_value: 16
            up_card_value: 10
            min_true_count: 0
            decision: Stand
"#;

    fn get_typical_config_rule() -> ConfigRule {
        ConfigRule {
            number_of_decks: 8,
            counting_system: String::from("KO"),
            european_rules: true,
            split_cap: 2,
            reshuffle_threshold: 100,
            dealer_trials: 500,
        }
    }

    #[test]
    fn can_convert_rule() {
        let config_rule = get_typical_config_rule();
        let converted_rule: blackjack::Rule = config_rule.try_into().unwrap();
        assert_eq!(converted_rule.number_of_decks, 8);
        assert_eq!(converted_rule.reshuffle_threshold, 100);
        assert_eq!(
            converted_rule.counting_system,
            blackjack::CountingSystem::Ko
        );
        assert!(converted_rule.european_rules);
    }

    #[test]
    fn should_return_error_when_converting_rule() {
        let mut config_rule = get_typical_config_rule();
        config_rule.counting_system = String::from("Not a system");
        let convert_result: anyhow::Result<blackjack::Rule> = config_rule.try_into();
        assert!(convert_result.is_err());

        let mut config_rule = get_typical_config_rule();
        config_rule.number_of_decks = 0;
        let convert_result: anyhow::Result<blackjack::Rule> = config_rule.try_into();
        assert!(convert_result.is_err());
    }

    #[test]
    fn missing_rule_fields_take_defaults() {
        let config = parse_config("campaign:\n  seats:\n    - {}\n").unwrap();
        let rule: blackjack::Rule = config.rule.try_into().unwrap();
        assert_eq!(rule, blackjack::Rule::default());
        assert_eq!(config.campaign.number_of_rounds, 1000);
        assert_eq!(config.campaign.seed, None);
        assert_eq!(config.campaign.seats[0].skill_level, 1.0);
        assert_eq!(config.campaign.seats[0].base_bet, 10.0);
    }

    #[test]
    fn typical_config_builds_a_campaign() {
        let config = parse_config(TYPICAL_CONFIG).unwrap();
        assert_eq!(config.campaign.seats.len(), 2);
        assert_eq!(config.campaign.seats[0].starting_bankroll, 1000.0);
        let mut campaign = config.build_campaign().unwrap();
        assert_eq!(campaign.players()[0].bet_size(), 5.0);
        assert_eq!(campaign.players()[1].bankroll(), 500.0);
        assert_eq!(campaign.players()[0].skill_level(), 0.8);

        let result = campaign.run(config.campaign.number_of_rounds, &mut ()).unwrap();
        assert_eq!(result.bankrolls.len(), 2);
        assert!(result.bankrolls.iter().all(|series| series.len() == 20));
    }

    #[test]
    fn bad_seats_are_rejected() {
        let mut config = parse_config(TYPICAL_CONFIG).unwrap();
        config.campaign.seats[0].skill_level = 1.5;
        assert!(config.build_campaign().is_err());

        let mut config = parse_config(TYPICAL_CONFIG).unwrap();
        if let Some(classifier) = config.campaign.seats[1].classifier.as_mut() {
            classifier.entries[0].decision = String::from("Surrender");
        }
        assert!(config.build_campaign().is_err());

        let mut config = parse_config(TYPICAL_CONFIG).unwrap();
        config.campaign.seats.clear();
        assert!(config.build_campaign().is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(parse_config_from_file("/nonexistent/blackjack.yml").is_err());
    }
}
