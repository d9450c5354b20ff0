// File: src/page.rs
// Purpose: Maud rendering of the intake form with prior values and errors

use intake_validation::{CountryTable, ErrorMap, Field, SanitizedRecord, ValidationConfig};
use maud::{html, Markup, PreEscaped, DOCTYPE};

/// Banner shown above the form after a submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub success: bool,
    pub message: String,
}

/// Everything the form needs to redraw itself
#[derive(Debug, Clone, Default)]
pub struct FormView {
    /// Sanitized (already escaped) values to repopulate inputs with
    pub values: SanitizedRecord,
    pub errors: ErrorMap,
    pub alert: Option<Alert>,
}

impl FormView {
    fn value(&self, field: Field) -> &str {
        self.values
            .get(field.as_str())
            .map(String::as_str)
            .unwrap_or("")
    }
}

const LIVE_CHECK_SCRIPT: &str = r#"
document.querySelectorAll('#intakeForm [name]').forEach(function (input) {
  input.addEventListener('blur', function () {
    var form = document.getElementById('intakeForm');
    var allData = Object.fromEntries(new FormData(form).entries());
    fetch('/api/validate', {
      method: 'POST',
      headers: { 'Content-Type': 'application/json', 'X-Requested-With': 'XMLHttpRequest' },
      body: JSON.stringify({ field: input.name, value: input.value, allData: allData })
    })
      .then(function (r) { return r.json(); })
      .then(function (res) {
        var slot = document.getElementById(input.name + '-error');
        if (slot) { slot.textContent = res.valid ? '' : res.message; }
        input.classList.toggle('error', !res.valid);
      });
  });
});

var message = document.getElementById('message');
var counter = document.getElementById('message-count');
if (message && counter) {
  var updateCount = function () {
    counter.textContent = message.value.length + ' / ' + message.maxLength;
  };
  message.addEventListener('input', updateCount);
  updateCount();
}

var password = document.getElementById('password');
var confirmPassword = document.getElementById('confirmPassword');
if (password && confirmPassword) {
  var markMatch = function () {
    if (confirmPassword.value === '') {
      confirmPassword.classList.remove('success', 'error');
      return;
    }
    var same = confirmPassword.value === password.value;
    confirmPassword.classList.toggle('success', same);
    confirmPassword.classList.toggle('error', !same);
  };
  password.addEventListener('input', markMatch);
  confirmPassword.addEventListener('input', markMatch);
}
"#;

pub fn render_page(view: &FormView, config: &ValidationConfig) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { "Contact Form" }
            }
            body {
                h1 { "Contact Form" }
                @if let Some(alert) = &view.alert {
                    div class={ "alert " (if alert.success { "success" } else { "error" }) } {
                        (alert.message)
                    }
                }
                form id="intakeForm" method="POST" action="/submit" novalidate {
                    (text_input(view, Field::Name, "text"))
                    (text_input(view, Field::Email, "email"))
                    (text_input(view, Field::Phone, "tel"))
                    (password_input(view, Field::Password))
                    (password_input(view, Field::ConfirmPassword))
                    (text_input(view, Field::Age, "number"))
                    (country_select(view, &config.countries))
                    (message_area(view, config.max_message_length))
                    button type="submit" { "Submit" }
                }
                script { (PreEscaped(LIVE_CHECK_SCRIPT)) }
            }
        }
    }
}

fn label(field: Field) -> Markup {
    html! {
        label for=(field.as_str()) {
            (field.label())
            @if field.is_required() {
                " " span class="required" { "*" }
            }
        }
    }
}

fn error_slot(view: &FormView, field: Field) -> Markup {
    html! {
        span class="error-message" id={ (field.as_str()) "-error" } {
            @if let Some(message) = view.errors.get(&field) {
                (message)
            }
        }
    }
}

fn input_class(view: &FormView, field: Field) -> Option<&'static str> {
    view.errors.contains_key(&field).then_some("error")
}

// Values are sanitized upstream, so they go in pre-escaped
fn text_input(view: &FormView, field: Field, input_type: &str) -> Markup {
    html! {
        div class="form-group" {
            (label(field))
            input type=(input_type) id=(field.as_str()) name=(field.as_str())
                value=(PreEscaped(view.value(field))) class=[input_class(view, field)];
            (error_slot(view, field))
        }
    }
}

// Secrets are never echoed back
fn password_input(view: &FormView, field: Field) -> Markup {
    html! {
        div class="form-group" {
            (label(field))
            input type="password" id=(field.as_str()) name=(field.as_str())
                class=[input_class(view, field)];
            (error_slot(view, field))
        }
    }
}

fn country_select(view: &FormView, countries: &CountryTable) -> Markup {
    let selected = view.value(Field::Country);
    html! {
        div class="form-group" {
            (label(Field::Country))
            select id="country" name="country" class=[input_class(view, Field::Country)] {
                option value="" { "Select your country" }
                @for country in countries.iter() {
                    option value=(country.code) selected[country.code == selected] {
                        (country.name)
                    }
                }
            }
            (error_slot(view, Field::Country))
        }
    }
}

fn message_area(view: &FormView, max_length: usize) -> Markup {
    html! {
        div class="form-group" {
            (label(Field::Message))
            textarea id="message" name="message" rows="4" maxlength=(max_length)
                class=[input_class(view, Field::Message)] {
                (PreEscaped(view.value(Field::Message)))
            }
            span class="char-count" id="message-count" { "0 / " (max_length) }
            (error_slot(view, Field::Message))
        }
    }
}
