//! Handlebars source for the contact notification

use email::EmailTemplate;

pub const CONTACT_TEMPLATE: &str = "contact_submission";

const SUBJECT: &str = "New Contact Form Submission: {{{subject}}}";

const HTML: &str = r#"<p><strong>Name:</strong> {{first_name}} {{last_name}}</p>
<p><strong>Email:</strong> {{email}}</p>
<p><strong>Phone:</strong> {{phone}}</p>
<p><strong>Subject:</strong> {{subject}}</p>
<p><strong>Message:</strong></p>
<p>{{message}}</p>
"#;

const TEXT: &str = "Name: {{{first_name}}} {{{last_name}}}
Email: {{{email}}}
Phone: {{{phone}}}
Subject: {{{subject}}}

Message:
{{{message}}}
";

pub fn contact_template() -> EmailTemplate {
    EmailTemplate {
        name: CONTACT_TEMPLATE.to_string(),
        subject: SUBJECT.to_string(),
        body_text: Some(TEXT.to_string()),
        body_html: Some(HTML.to_string()),
    }
}
