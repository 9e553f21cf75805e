use clap::{CommandFactory, FromArgMatches, Parser};
use mixforge::catalog::{Catalog, Effect};
use mixforge::config::{Config, GeneticParams, SearchParams, SubstanceParams};
use mixforge::error::MixForgeError;
use mixforge::optimizer::SearchConfig;
use std::io::Write;
use std::time::Duration;

#[derive(Parser, Debug)]
struct TestCli {
    #[command(flatten)]
    config: Config,
}

fn parse(args: &[&str]) -> (TestCli, clap::ArgMatches) {
    let matches = TestCli::command().get_matches_from(args);
    let cli = TestCli::from_arg_matches(&matches).unwrap();
    (cli, matches)
}

#[test]
fn test_cli_defaults_match_default_impls() {
    let (cli, _) = parse(&["test"]);
    assert_eq!(cli.config.genetics, GeneticParams::default());
    let search = SearchParams::default();
    assert_eq!(cli.config.search.combo_size, search.combo_size);
    assert_eq!(cli.config.search.time_limit, search.time_limit);
    assert_eq!(cli.config.search.max_perms, search.max_perms);
    assert!(cli.config.search.banned.is_empty());
}

#[test]
fn test_repeatable_ban_and_effect_list() {
    let (cli, _) = parse(&[
        "test", "--ban", "Cuke", "--ban", "Horse Semen", "-e", "Calming,Sneaky",
    ]);
    assert_eq!(cli.config.search.banned, vec!["Cuke", "Horse Semen"]);
    assert_eq!(cli.config.search.substance.effects, vec!["Calming", "Sneaky"]);
}

#[test]
fn test_default_params_validate() {
    GeneticParams::default().validate().unwrap();
}

#[test]
fn test_inverted_range_rejected() {
    let params = GeneticParams {
        tournament_min: 9,
        tournament_max: 3,
        ..GeneticParams::default()
    };
    assert!(matches!(params.validate(), Err(MixForgeError::Config(_))));
}

#[test]
fn test_zero_interval_rejected() {
    let params = GeneticParams {
        report_interval: 0,
        ..GeneticParams::default()
    };
    assert!(params.validate().is_err());
}

#[test]
fn test_partial_genetics_file_keeps_defaults() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{ "population_min": 50, "population_max": 60 }}"#).unwrap();

    let params = GeneticParams::load_from_file(file.path()).unwrap();
    assert_eq!(params.population_min, 50);
    assert_eq!(params.population_max, 60);
    assert_eq!(params.max_generations, 10_000);
    assert_eq!(params.tournament_max, 8);
}

#[test]
fn test_explicit_flags_override_file() {
    let mut file_params = GeneticParams {
        population_min: 50,
        population_max: 60,
        ..GeneticParams::default()
    };
    let (cli, matches) = parse(&["test", "--population-max", "90", "--max-generations", "7"]);
    file_params.merge_from_cli(&cli.config.genetics, &matches);

    assert_eq!(file_params.population_min, 50);
    assert_eq!(file_params.population_max, 90);
    assert_eq!(file_params.max_generations, 7);
}

#[test]
fn test_material_sets_seed_and_value() {
    let catalog = Catalog::standard();
    let substance = SubstanceParams {
        material: Some("Green Crack".into()),
        ..SubstanceParams::default()
    };
    let (seed, base) = substance.resolve(&catalog).unwrap();
    assert_eq!(seed.effects().collect::<Vec<_>>(), vec![Effect::Energizing]);
    assert_eq!(base, 35.0);
}

#[test]
fn test_explicit_base_value_wins() {
    let catalog = Catalog::standard();
    let substance = SubstanceParams {
        material: Some("Cocaine".into()),
        effects: vec!["Calming".into()],
        base_value: Some(200.0),
    };
    let (seed, base) = substance.resolve(&catalog).unwrap();
    assert_eq!(seed.len(), 1);
    assert_eq!(base, 200.0);
}

#[test]
fn test_too_many_initial_effects() {
    let catalog = Catalog::standard();
    let substance = SubstanceParams {
        effects: [
            "Calming", "Sneaky", "Spicy", "Toxic", "Foggy", "Glowing", "Balding", "Smelly",
            "Athletic",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect(),
        ..SubstanceParams::default()
    };
    assert!(matches!(
        substance.resolve(&catalog),
        Err(MixForgeError::Config(_))
    ));
}

#[test]
fn test_search_config_from_params() {
    let catalog = Catalog::standard();
    let params = SearchParams {
        combo_size: 5,
        time_limit: 3,
        banned: vec!["Cuke".into()],
        substance: SubstanceParams {
            material: Some("meth".into()),
            ..SubstanceParams::default()
        },
        ..SearchParams::default()
    };
    let config = SearchConfig::from_params(&params, &catalog).unwrap();
    assert_eq!(config.combo_size, 5);
    assert_eq!(config.time_limit, Duration::from_secs(3));
    assert_eq!(config.base_value, 70.0);
    assert!(config.initial_effects.is_empty());
}

#[test]
fn test_unknown_material() {
    let catalog = Catalog::standard();
    let params = SearchParams {
        substance: SubstanceParams {
            material: Some("Oregano".into()),
            ..SubstanceParams::default()
        },
        ..SearchParams::default()
    };
    assert!(matches!(
        SearchConfig::from_params(&params, &catalog),
        Err(MixForgeError::UnknownMaterial(_))
    ));
}
