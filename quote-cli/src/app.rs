//! Command handlers for the `ssik` binary.
//!
//! Each handler takes already-parsed input and returns the text to print,
//! so the screens can be tested without spawning the binary.

use std::{fs::File, io::Read, path::Path};

use anyhow::{Context, Result};
use quote_core::validation::{CardDetails, ContactDetails, ContactMessage, LoginForm};
use quote_core::{Catalogue, CatalogueError, CheckoutSession, CourseDuration, Selection};
use quote_data::{CatalogueLoader, EnrolmentLoader};
use tracing::{debug, info, warn};

use crate::config::CatalogueConfig;
use crate::render;

/// The built-in course list, or the CSV named in `[catalogue] file`.
pub fn load_catalogue(config: &CatalogueConfig) -> Result<Catalogue> {
    match &config.file {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("cannot open catalogue file '{}'", path.display()))?;
            let catalogue = CatalogueLoader::load(file)
                .with_context(|| format!("cannot load catalogue file '{}'", path.display()))?;
            info!(
                path = %path.display(),
                courses = catalogue.courses().len(),
                "loaded catalogue"
            );
            Ok(catalogue)
        }
        None => Ok(Catalogue::standard().clone()),
    }
}

/// Selects the named courses plus every course in the named groups.
pub fn build_selection(
    catalogue: &Catalogue,
    ids: &[String],
    groups: &[CourseDuration],
) -> Result<Selection, CatalogueError> {
    let mut selection = Selection::from_ids(catalogue, ids)?;
    for &group in groups {
        let added = selection.extend_group(catalogue, group);
        debug!(group = group.group_key(), added, "selected course group");
    }
    Ok(selection)
}

pub fn login(form: &LoginForm) -> Result<String> {
    form.validate()?;
    Ok(render::render_home(form.display_name()))
}

pub fn about(catalogue: &Catalogue) -> String {
    render::render_about(catalogue)
}

pub fn courses(
    catalogue: &Catalogue,
    group: Option<CourseDuration>,
) -> String {
    render::render_course_list(catalogue, group)
}

pub fn course(
    catalogue: &Catalogue,
    id: &str,
) -> String {
    render::render_course_detail(catalogue, id)
}

pub fn quote(
    catalogue: &Catalogue,
    ids: &[String],
    groups: &[CourseDuration],
) -> Result<String> {
    let session = CheckoutSession::new(build_selection(catalogue, ids, groups)?);
    Ok(render::render_quote(session.selection(), session.quote()))
}

/// Runs the whole checkout: review, payment form, confirmation.
pub fn pay(
    catalogue: &Catalogue,
    ids: &[String],
    groups: &[CourseDuration],
    card: &CardDetails,
) -> Result<String> {
    let mut session = CheckoutSession::new(build_selection(catalogue, ids, groups)?);
    session.proceed_to_payment()?;
    let receipt = session.confirm_payment(card)?;

    let mut out = render::render_quote(session.selection(), session.quote());
    out.push('\n');
    out.push_str(&render::payment_notice(receipt.total));
    out.push('\n');
    Ok(out)
}

pub fn consultant(
    catalogue: &Catalogue,
    ids: &[String],
    groups: &[CourseDuration],
    contact: &ContactDetails,
) -> Result<String> {
    let session = CheckoutSession::new(build_selection(catalogue, ids, groups)?);
    let request = session.request_consultant(contact)?;

    let mut out = render::render_quote(session.selection(), &request.quote);
    out.push('\n');
    out.push_str(&format!(
        "Thank you {}, a consultant will contact you at {} or {} about {} course(s).\n",
        request.contact.name,
        request.contact.email,
        request.contact.phone,
        request.course_ids.len()
    ));
    Ok(out)
}

/// Contact details, and the thank-you notice when a message is sent.
pub fn contact(message: Option<&ContactMessage>) -> Result<String> {
    let mut out = render::render_contact_info();
    if let Some(message) = message {
        message.validate()?;
        info!(name = %message.name, "contact message received");
        out.push('\n');
        out.push_str(&render::thank_you_notice(&message.name));
        out.push('\n');
    }
    Ok(out)
}

/// Quotes every row of an enrolment CSV.
///
/// A row with bad contact details is still quoted; its problems are listed
/// under the quote. An unknown course id stops the batch.
pub fn batch<R: Read>(
    catalogue: &Catalogue,
    reader: R,
) -> Result<String> {
    let requests = EnrolmentLoader::load(reader, catalogue)?;
    let mut out = String::new();

    for request in &requests {
        let session = CheckoutSession::new(request.selection.clone());
        out.push_str(&format!("Row {}: {}\n", request.row, request.contact.name));
        out.push_str(&render::render_quote(session.selection(), session.quote()));
        if let Err(errors) = request.contact.validate() {
            warn!(row = request.row, %errors, "enrolment has invalid contact details");
            for error in errors.iter() {
                out.push_str(&format!("  ! {error}\n"));
            }
        }
        out.push('\n');
    }

    out.push_str(&format!("Quoted {} enrolment(s).\n", requests.len()));
    Ok(out)
}

pub fn batch_file(
    catalogue: &Catalogue,
    path: &Path,
) -> Result<String> {
    let file = File::open(path)
        .with_context(|| format!("cannot open enrolment file '{}'", path.display()))?;
    batch(catalogue, file).with_context(|| format!("cannot quote '{}'", path.display()))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn ids(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|id| id.to_string()).collect()
    }

    fn card() -> CardDetails {
        CardDetails {
            name_on_card: "T Mokoena".to_string(),
            card_number: "4111111111111111".to_string(),
            expiry: "12/27".to_string(),
            cvv: "123".to_string(),
        }
    }

    #[test]
    fn build_selection_merges_ids_and_groups() {
        let selection = build_selection(
            Catalogue::standard(),
            &ids(&["first-aid", "cooking"]),
            &[CourseDuration::SixWeeks],
        )
        .unwrap();

        assert_eq!(
            selection.ids(),
            vec!["first-aid", "cooking", "child-minding", "garden-maintenance"]
        );
    }

    #[test]
    fn build_selection_rejects_unknown_id() {
        let result = build_selection(Catalogue::standard(), &ids(&["pottery"]), &[]);

        assert_eq!(
            result.err(),
            Some(CatalogueError::UnknownCourse("pottery".to_string()))
        );
    }

    #[test]
    fn login_requires_credentials() {
        let error = login(&LoginForm::default()).unwrap_err();

        assert_eq!(error.to_string(), "Please enter a username and password.");
    }

    #[test]
    fn pay_prints_rounded_total() {
        let text = pay(Catalogue::standard(), &ids(&["cooking", "sewing"]), &[], &card()).unwrap();

        assert!(text.ends_with("Payment of R2458.13 confirmed!\n"));
    }

    #[test]
    fn pay_rejects_empty_selection() {
        let error = pay(Catalogue::standard(), &[], &[], &card()).unwrap_err();

        assert_eq!(error.to_string(), "No courses selected.");
    }

    #[test]
    fn pay_rejects_incomplete_card() {
        let error = pay(
            Catalogue::standard(),
            &ids(&["cooking"]),
            &[],
            &CardDetails::default(),
        )
        .unwrap_err();

        assert_eq!(error.to_string(), "Please fill in all card details.");
    }

    #[test]
    fn consultant_lists_contact() {
        let contact = ContactDetails::new("Sipho", "sipho@example.co.za", "082 123 4567");

        let text = consultant(Catalogue::standard(), &ids(&["landscaping"]), &[], &contact).unwrap();

        assert!(text.contains("Thank you Sipho, a consultant will contact you"));
        assert!(text.contains("R1725.00"));
    }

    #[test]
    fn contact_without_message_shows_info_only() {
        let text = contact(None).unwrap();

        assert_eq!(text, render::render_contact_info());
    }

    #[test]
    fn contact_with_blank_message_is_rejected() {
        let message = ContactMessage {
            name: "Sipho".to_string(),
            message: " ".to_string(),
        };

        let error = contact(Some(&message)).unwrap_err();

        assert_eq!(
            error.to_string(),
            "Please fill in all fields before sending your message."
        );
    }

    #[test]
    fn batch_quotes_each_row_and_flags_bad_contacts() {
        let csv = "name,email,phone,courses
Thandi,thandi@example.co.za,082 123 4567,first-aid
Bongani,bongani,082,cooking;sewing
";

        let text = batch(Catalogue::standard(), csv.as_bytes()).unwrap();

        assert!(text.starts_with("Row 1: Thandi\n"));
        assert!(text.contains("Row 2: Bongani\n"));
        assert!(text.contains("  ! 'bongani' is not a valid email address\n"));
        assert!(text.ends_with("Quoted 2 enrolment(s).\n"));
    }

    #[test]
    fn standard_catalogue_is_used_without_file() {
        let catalogue = load_catalogue(&CatalogueConfig::default()).unwrap();

        assert_eq!(catalogue.courses().len(), 7);
    }
}
