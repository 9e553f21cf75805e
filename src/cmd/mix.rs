use crate::reports;
use clap::Args;
use mixforge::catalog::Catalog;
use mixforge::config::SubstanceParams;
use mixforge::error::MfResult;
use mixforge::scorer::Scorer;
use std::sync::Arc;

#[derive(Args, Debug, Clone)]
pub struct MixArgs {
    /// Items in application order
    #[arg(required = true, value_name = "ITEM")]
    pub items: Vec<String>,

    #[command(flatten)]
    pub substance: SubstanceParams,
}

pub fn run(args: MixArgs, catalog: Arc<Catalog>) -> MfResult<()> {
    let (seed, base_value) = args.substance.resolve(&catalog)?;
    let scorer = Scorer::new(catalog);

    let combination = scorer.catalog().items.resolve_all(&args.items)?;
    let (effects, steps) = scorer.apply_traced(&combination, &seed);
    reports::print_mix_trace(&steps);

    let evaluation = scorer.evaluate(&combination, &seed);
    debug_assert_eq!(evaluation.effects, effects);
    reports::print_effects("Final effects:", &effects);

    println!(
        "Multiplier x{:.2} | Cost ${:.2} | Sell ${:.2} | Profit ${:.2}",
        evaluation.multiplier,
        evaluation.cost,
        evaluation.sell_price(base_value),
        evaluation.profit(base_value)
    );
    Ok(())
}
