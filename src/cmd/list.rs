use crate::reports;
use mixforge::catalog::Catalog;

pub fn run(catalog: &Catalog) {
    reports::print_catalog(catalog);
}
