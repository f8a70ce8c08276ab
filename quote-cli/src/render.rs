//! Plain-text screens printed by the `ssik` commands.
//!
//! Amounts are shown as `R` followed by the value rounded half-up to two
//! decimal places, e.g. `R3881.25` or `R8064.38`.

use quote_core::calculations::common::to_currency_places;
use quote_core::{Catalogue, Course, CourseDuration, Quote, Selection};
use rust_decimal::Decimal;

pub const ORGANISATION: &str = "Empowering The Nation";
pub const NO_COURSES_SELECTED: &str = "No courses selected.";
pub const COURSE_NOT_FOUND: &str = "Course Not Found";

pub const CONTACT_ADDRESS: &str = "123 Training Road, Durban";
pub const CONTACT_PHONE: &str = "+27 11 234 5678";
pub const CONTACT_EMAIL: &str = "info@empoweringnation.org";

const LABEL_WIDTH: usize = 28;
const AMOUNT_WIDTH: usize = 12;

/// `R` + amount at two decimal places, rounded half-up.
pub fn format_rand(amount: Decimal) -> String {
    if amount.is_sign_negative() && !amount.is_zero() {
        format!("-R{}", to_currency_places(amount.abs()))
    } else {
        format!("R{}", to_currency_places(amount))
    }
}

fn line(
    label: &str,
    amount: &str,
) -> String {
    format!("{label:<LABEL_WIDTH$}{amount:>AMOUNT_WIDTH$}\n")
}

/// The checkout review: one line per course, then the breakdown.
pub fn render_quote(
    selection: &Selection,
    quote: &Quote,
) -> String {
    if selection.is_empty() {
        return format!("{NO_COURSES_SELECTED}\n");
    }

    let mut out = String::new();
    for course in selection {
        out.push_str(&line(&course.title, &format_rand(course.fee)));
    }
    out.push('\n');
    out.push_str(&line("Subtotal", &format_rand(quote.subtotal)));
    out.push_str(&line(
        &format!("Discount ({}%)", quote.discount_percent()),
        &format!("-{}", format_rand(quote.discount)),
    ));
    out.push_str(&line("After discount", &format_rand(quote.after_discount)));
    out.push_str(&line(
        &format!("VAT ({}%)", quote.vat_percent()),
        &format_rand(quote.vat),
    ));
    out.push_str(&line("Total", &format_rand(quote.total)));
    out
}

fn render_group(
    out: &mut String,
    catalogue: &Catalogue,
    duration: CourseDuration,
) {
    let courses: Vec<&Course> = catalogue.group(duration).collect();
    if courses.is_empty() {
        return;
    }
    out.push_str(duration.group_title());
    out.push('\n');
    for course in courses {
        out.push_str(&format!(
            "  {:<24}{:>12}  [{}]\n",
            course.title,
            format!("Fee: {}", format_rand(course.fee)),
            course.id
        ));
    }
}

/// Catalogue listing, grouped by duration. `group` limits it to one group.
pub fn render_course_list(
    catalogue: &Catalogue,
    group: Option<CourseDuration>,
) -> String {
    let mut out = String::new();
    let groups = match group {
        Some(duration) => vec![duration],
        None => CourseDuration::all().to_vec(),
    };
    for (index, duration) in groups.into_iter().enumerate() {
        if index > 0 {
            out.push('\n');
        }
        render_group(&mut out, catalogue, duration);
    }
    out
}

/// Detail screen for one course, or [`COURSE_NOT_FOUND`].
pub fn render_course_detail(
    catalogue: &Catalogue,
    id: &str,
) -> String {
    let Some(course) = catalogue.get(id) else {
        return format!("{COURSE_NOT_FOUND}\n");
    };

    let mut out = format!("{}\nFee: {}\n", course.title, format_rand(course.fee));

    match catalogue.detail(id) {
        Some(detail) => {
            out.push_str(&format!(
                "Duration: {}\n\nPurpose\n  {}\n\nContent\n",
                detail.schedule, detail.purpose
            ));
            for item in &detail.content {
                out.push_str(&format!("  • {item}\n"));
            }
        }
        None => out.push_str(&format!("Duration: {}\n", course.duration.as_str())),
    }
    out
}

/// Home screen shown after login.
pub fn render_home(name: &str) -> String {
    format!(
        "{ORGANISATION}
Welcome, {name}
Choose a course or option below

  courses     Learn essential skills for emergencies.
  courses --group <6-month|6-week>
              Choose between either a six week course or six month course.
  about       Learn more about Empowering the Nation.
  contact     Reach out for more info or assistance.

Developed by S.S.I.K Nova
"
    )
}

/// The organisation's About page, followed by the course fees.
pub fn render_about(catalogue: &Catalogue) -> String {
    let mut out = String::from(
        "About Us
  Empowering the Nation was established by Precious Radebe in 2022 in
  Johannesburg, South Africa. The organization is dedicated to making a
  positive impact on the lives of individuals and communities through
  various initiatives and programs. Hundreds of domestic workers and
  gardeners have been trained on both the six-month long Learnerships and
  six-week Short Skills Training Programmes to empower themselves and can
  provide more marketable skills.

Our Mission
  Empowering the Nation is committed to fostering empowerment, education,
  and sustainable development. The organization aims to provide resources,
  support, and opportunities to underserved populations, enabling them to
  overcome challenges and achieve their full potential.

Our Vision
  Our vision is to create a world where every individual has access to the
  tools and opportunities they need to thrive. We envision a future where
  communities are self-sufficient, resilient, and capable of driving
  positive change from within.

Our Services
  • Consulting: expert advice and strategies to help businesses grow.
  • Training & Development: workshops and training sessions.
  • Community Outreach: supporting local development and empowerment.
  • Project Management: planning, execution and completion of projects.

Courses
",
    );
    for course in catalogue.courses() {
        out.push_str(&format!(
            "  {:<24}Fee: {}\n",
            course.title,
            format_rand(course.fee)
        ));
        if let Some(detail) = catalogue.detail(&course.id) {
            out.push_str(&format!("    {}\n", detail.purpose));
        }
    }
    out
}

pub fn render_contact_info() -> String {
    format!(
        "Contact Us
  Address: {CONTACT_ADDRESS}
  Phone: {CONTACT_PHONE}
  Email: {CONTACT_EMAIL}
"
    )
}

pub fn thank_you_notice(name: &str) -> String {
    format!("Thank you {name}, we might get back to you soon!")
}

pub fn payment_notice(total: Decimal) -> String {
    format!("Payment of {} confirmed!", format_rand(total))
}
