//! Integration tests for loading a catalogue file and pricing enrolments
//! against it.

use pretty_assertions::assert_eq;
use quote_core::{
    Catalogue, CatalogueError, QuoteCalculator, Selection, calculate_quote,
    calculations::DiscountSchedule,
};
use quote_data::{CatalogueLoader, CatalogueLoaderError, EnrolmentLoader};
use rust_decimal_macros::dec;

const CATALOGUE_CSV: &str = include_str!("../test-data/catalogue.csv");
const ENROLMENTS_CSV: &str = include_str!("../test-data/enrolments.csv");

fn load_catalogue() -> Catalogue {
    CatalogueLoader::load(CATALOGUE_CSV.as_bytes()).expect("Failed to load catalogue")
}

#[test]
fn test_catalogue_file_matches_standard_catalogue() {
    let catalogue = load_catalogue();

    let loaded: Vec<_> = catalogue.courses().to_vec();
    let standard: Vec<_> = Catalogue::standard().courses().to_vec();

    assert_eq!(loaded, standard);
}

#[test]
fn test_catalogue_file_has_no_details() {
    let catalogue = load_catalogue();

    assert!(catalogue.detail("first-aid").is_none());
}

#[test]
fn test_enrolments_price_like_checkout() {
    let catalogue = load_catalogue();

    let requests =
        EnrolmentLoader::load(ENROLMENTS_CSV.as_bytes(), &catalogue).expect("Failed to load");
    let totals: Vec<_> = requests
        .iter()
        .map(|request| calculate_quote(&request.selection).total)
        .collect();

    assert_eq!(totals, vec![dec!(1725), dec!(3881.25), dec!(8064.375)]);
}

#[test]
fn test_enrolment_contacts_are_valid() {
    let catalogue = load_catalogue();

    let requests = EnrolmentLoader::load(ENROLMENTS_CSV.as_bytes(), &catalogue).unwrap();

    for request in &requests {
        assert_eq!(request.contact.validate(), Ok(()), "row {}", request.row);
    }
}

#[test]
fn test_repriced_catalogue_changes_quote() {
    let csv = "id,title,fee,duration\ncooking,Cooking,1000,6 weeks\nsewing,Sewing,1000,6 months";
    let catalogue = CatalogueLoader::load(csv.as_bytes()).unwrap();
    let requests = EnrolmentLoader::load(
        "name,email,phone,courses\nA,a@b.co,0821234567,cooking;sewing".as_bytes(),
        &catalogue,
    )
    .unwrap();
    let schedule = DiscountSchedule::standard();

    let quote = QuoteCalculator::new(&schedule).calculate(&requests[0].selection);

    assert_eq!(quote.subtotal, dec!(2000));
    assert_eq!(quote.discount, dec!(100));
    assert_eq!(quote.total, dec!(2185));
}

#[test]
fn test_negative_fee_is_rejected() {
    let csv = "id,title,fee,duration\ncooking,Cooking,-5,6 weeks";

    let result = CatalogueLoader::load(csv.as_bytes());

    assert!(matches!(result, Err(CatalogueLoaderError::Catalogue(_))));
}

#[test]
fn test_fee_above_limit_is_rejected() {
    let csv = "id,title,fee,duration\nbig,Big,79228162514264337593543950335,6 weeks";

    let result = CatalogueLoader::load(csv.as_bytes());

    assert!(matches!(
        result,
        Err(CatalogueLoaderError::Catalogue(CatalogueError::FeeOutOfRange { .. }))
    ));
}

#[test]
fn test_largest_accepted_fees_price_without_overflow() {
    let csv = "id,title,fee,duration
a,A,1000000000000000,6 weeks
b,B,1000000000000000,6 weeks
c,C,1000000000000000,6 months
d,D,1000000000000000,6 months";
    let catalogue = CatalogueLoader::load(csv.as_bytes()).expect("fees at the limit are accepted");

    let selection = Selection::from_ids(&catalogue, ["a", "b", "c", "d"]).unwrap();
    let quote = calculate_quote(&selection);

    assert_eq!(quote.subtotal, dec!(4000000000000000));
    assert_eq!(quote.total, dec!(3910000000000000));
}
