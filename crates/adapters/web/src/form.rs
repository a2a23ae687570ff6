//! The access request form on `access-request.html`.

use std::rc::Rc;

use labsindex_app::services::AccessRequestService;
use labsindex_domain::access_request::{Field, FieldError, RawAccessRequest, validate_field};
use labsindex_domain::error::LabsIndexError;
use labsindex_domain::username::UsernameCheck;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, HtmlButtonElement, HtmlElement, HtmlInputElement, HtmlSelectElement,
    HtmlTextAreaElement, Window,
};

use crate::error::{SubmitError, WebError};
use crate::github::GithubLookup;
use crate::listener::Listener;

const SUBMITTING_LABEL: &str = "Submitting...";
const SUBMIT_FAILED: &str = "There was an error submitting your request. Please try again.";
const VERIFIED_COLOR: &str = "#28a745";
const WARNING_COLOR: &str = "#e68a00";

fn field_value(element: &Element) -> String {
    if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
        input.value()
    } else if let Some(select) = element.dyn_ref::<HtmlSelectElement>() {
        select.value()
    } else if let Some(area) = element.dyn_ref::<HtmlTextAreaElement>() {
        area.value()
    } else {
        String::new()
    }
}

fn set_display(element: &HtmlElement, display: &str) {
    let _ = element.style().set_property("display", display);
}

struct AccessForm {
    window: Window,
    document: Document,
    form: HtmlElement,
    fields: Vec<(Field, Element)>,
    submit: Option<HtmlButtonElement>,
    submit_label: String,
    success: Option<HtmlElement>,
    service: AccessRequestService<GithubLookup>,
}

impl AccessForm {
    fn element(&self, field: Field) -> Option<&Element> {
        self.fields
            .iter()
            .find_map(|(f, el)| (*f == field).then_some(el))
    }

    /// The `.form-error` span next to `element`, created on first use.
    fn error_slot(&self, element: &Element) -> Option<HtmlElement> {
        let parent = element.parent_element()?;
        if let Ok(Some(existing)) = parent.query_selector(".form-error") {
            return existing.dyn_into::<HtmlElement>().ok();
        }
        let slot = self
            .document
            .create_element("span")
            .ok()?
            .unchecked_into::<HtmlElement>();
        slot.set_class_name("form-error");
        let _ = slot.set_attribute("role", "alert");
        set_display(&slot, "none");
        let error_id = format!("{}-error", element.id());
        slot.set_id(&error_id);
        parent.append_child(&slot).ok()?;
        let _ = element.set_attribute("aria-describedby", &error_id);
        Some(slot)
    }

    fn show_field_error(&self, element: &Element, message: &str) {
        let _ = element.set_attribute("aria-invalid", "true");
        if let Some(slot) = self.error_slot(element) {
            slot.set_text_content(Some(message));
            let _ = slot.style().remove_property("color");
            set_display(&slot, "block");
        }
    }

    fn clear_field_error(&self, element: &Element) {
        let _ = element.remove_attribute("aria-invalid");
        if let Some(slot) = self.error_slot(element) {
            slot.set_text_content(None);
            set_display(&slot, "none");
        }
    }

    fn show_feedback(&self, element: &Element, message: &str, color: &str) {
        self.clear_field_error(element);
        if let Some(slot) = self.error_slot(element) {
            slot.set_text_content(Some(message));
            let _ = slot.style().set_property("color", color);
            set_display(&slot, "block");
        }
    }

    fn validate(&self, field: Field, element: &Element) -> bool {
        match validate_field(field, &field_value(element)) {
            Ok(()) => {
                self.clear_field_error(element);
                true
            }
            Err(err) => {
                self.show_field_error(element, err.message());
                false
            }
        }
    }

    fn show_username_check(&self, check: UsernameCheck) {
        let (Some(element), Some(message)) = (self.element(Field::Github), check.feedback())
        else {
            return;
        };
        match check {
            UsernameCheck::Exists => self.show_feedback(element, message, VERIFIED_COLOR),
            UsernameCheck::Unknown => self.show_feedback(element, message, WARNING_COLOR),
            UsernameCheck::NotFound => self.show_field_error(element, message),
            UsernameCheck::NotChecked => {}
        }
    }

    fn raw_request(&self) -> RawAccessRequest {
        let mut raw = RawAccessRequest::default();
        for (field, element) in &self.fields {
            raw.set(*field, field_value(element));
        }
        raw
    }

    fn set_submitting(&self, submitting: bool) {
        if let Some(button) = &self.submit {
            button.set_disabled(submitting);
            let label = if submitting {
                SUBMITTING_LABEL
            } else {
                self.submit_label.as_str()
            };
            button.set_text_content(Some(label));
        }
    }

    fn show_form_error(&self) {
        let Some(banner) = self
            .document
            .get_element_by_id("error-message")
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        else {
            return;
        };
        banner.set_text_content(Some(SUBMIT_FAILED));
        set_display(&banner, "block");
    }

    fn file_request(&self) -> Result<(), SubmitError> {
        let submission = self.service.prepare(&self.raw_request())?;
        let opened = self
            .window
            .open_with_url_and_target_and_features(
                submission.issue_url.as_str(),
                "_blank",
                "noopener,noreferrer",
            )
            .map_err(WebError::from)?;
        if opened.is_none() {
            // noopener windows are never returned, and blocked popups look the same.
            tracing::debug!("issue page opened without a window handle");
        }
        Ok(())
    }

    fn submit(&self) {
        let mut all_valid = true;
        for (field, element) in &self.fields {
            all_valid &= self.validate(*field, element);
        }
        if !all_valid {
            return;
        }

        self.set_submitting(true);
        match self.file_request() {
            Ok(()) => {
                set_display(&self.form, "none");
                if let Some(success) = &self.success {
                    set_display(success, "block");
                }
            }
            Err(SubmitError::Rejected(LabsIndexError::Validation(validation))) => {
                tracing::info!(%validation, "access request refused");
                for (field, field_err) in &validation.errors {
                    self.mark_invalid(*field, *field_err);
                }
                self.set_submitting(false);
            }
            Err(err) => {
                tracing::error!(error = %err, "access request submission failed");
                self.show_form_error();
                self.set_submitting(false);
            }
        }
    }

    fn mark_invalid(&self, field: Field, err: FieldError) {
        if let Some(element) = self.element(field) {
            self.show_field_error(element, err.message());
        }
    }
}

/// Form listeners. Dropping this detaches them all.
pub struct AccessRequestForm {
    _listeners: Vec<Listener>,
}

impl AccessRequestForm {
    /// Wire `#access-form` if the page has one.
    ///
    /// # Errors
    ///
    /// Returns a [`WebError`] if a listener cannot be registered.
    pub fn install(
        window: &Window,
        document: &Document,
        service: AccessRequestService<GithubLookup>,
    ) -> Result<Option<Self>, WebError> {
        let Some(form) = document
            .get_element_by_id("access-form")
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        else {
            return Ok(None);
        };

        let submit = ["#submit-btn", "[type=\"submit\"]"]
            .into_iter()
            .find_map(|selector| form.query_selector(selector).ok().flatten())
            .and_then(|el| el.dyn_into::<HtmlButtonElement>().ok());
        let submit_label = submit
            .as_ref()
            .and_then(|button| button.text_content())
            .unwrap_or_else(|| "Submit Request".to_string());
        let fields = Field::ALL
            .into_iter()
            .filter_map(|field| {
                let element = form.query_selector(&format!("#{}", field.id())).ok()??;
                Some((field, element))
            })
            .collect();

        let state = Rc::new(AccessForm {
            window: window.clone(),
            document: document.clone(),
            success: document
                .get_element_by_id("success-message")
                .and_then(|el| el.dyn_into::<HtmlElement>().ok()),
            form,
            fields,
            submit,
            submit_label,
            service,
        });

        let mut listeners = Vec::new();
        for (field, element) in &state.fields {
            let field = *field;
            let handler = Rc::clone(&state);
            let target = element.clone();
            listeners.push(Listener::new(element, "blur", move |_| {
                let valid = handler.validate(field, &target);
                if field == Field::Github && valid {
                    check_username(Rc::clone(&handler), field_value(&target));
                }
            })?);
        }

        let handler = Rc::clone(&state);
        listeners.push(Listener::new(&state.form, "submit", move |event| {
            event.prevent_default();
            handler.submit();
        })?);

        tracing::debug!(fields = state.fields.len(), "access request form ready");
        Ok(Some(Self {
            _listeners: listeners,
        }))
    }
}

fn check_username(form: Rc<AccessForm>, username: String) {
    wasm_bindgen_futures::spawn_local(async move {
        let check = form.service.check_username(&username).await;
        let still_current = form
            .element(Field::Github)
            .is_some_and(|el| field_value(el).trim() == username.trim());
        if still_current {
            form.show_username_check(check);
        }
    });
}
