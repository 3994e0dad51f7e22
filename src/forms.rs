// SPDX-License-Identifier: MPL-2.0

//! Catalog of the cascading forms and the backend endpoints behind them.

use crate::api::Endpoint;
use crate::chain::{
    DependencyChain, Envelope, Extractor, FieldMapping, LevelSpec, OptionValue, SelectOption,
    label_text,
};
use crate::fl;
use serde_json::Value;

/// The forms that carry a dependency chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormKind {
    /// course → chapter → content
    CourseContent,
    /// organization → program → semester → student
    Enrollment,
}

impl FormKind {
    /// Builds an empty chain for this form.
    pub fn chain(self) -> DependencyChain {
        DependencyChain::new(self.levels())
    }

    fn levels(self) -> Vec<LevelSpec> {
        match self {
            FormKind::CourseContent => vec![
                LevelSpec::new(
                    "course",
                    fl!("level-course"),
                    Endpoint::path("courses"),
                    FieldMapping::new(&["id", "course_id"], &["name", "title"]),
                ),
                LevelSpec::new(
                    "chapter",
                    fl!("level-chapter"),
                    Endpoint::path("courses/{parent}/chapters"),
                    FieldMapping::new(&["chapter_id", "id"], &["chapter_name", "name"]),
                ),
                LevelSpec::new(
                    "content",
                    fl!("level-content"),
                    Endpoint::path("chapters/{parent}/contents"),
                    FieldMapping::new(&["id", "content_id"], &["title", "name"]),
                ),
            ],
            FormKind::Enrollment => vec![
                LevelSpec::new(
                    "organization",
                    fl!("level-organization"),
                    Endpoint::path("organizations"),
                    FieldMapping::new(&["id"], &["name"]),
                ),
                LevelSpec::new(
                    "program",
                    fl!("level-program"),
                    Endpoint::query("programs", "organization_id"),
                    FieldMapping::new(&["id", "program_id"], &["program_name", "name"]),
                ),
                LevelSpec::new(
                    "semester",
                    fl!("level-semester"),
                    Endpoint::path("programs/{parent}/semesters"),
                    FieldMapping::new(&["id", "semester_id"], &["semester_name", "name"]),
                ),
                LevelSpec::new(
                    "student",
                    fl!("level-student"),
                    Endpoint::path("semesters/{parent}/students"),
                    Extractor::Custom(student_option),
                )
                .envelope(Envelope::with_keys(&["data", "students", "items"])),
            ],
        }
    }
}

/// Students are labelled by name, which the API splits across fields.
fn student_option(entity: &Value) -> Option<SelectOption> {
    let value = ["id", "student_id"]
        .iter()
        .find_map(|field| entity.get(*field).and_then(OptionValue::from_json))?;

    let first = entity.get("first_name").and_then(label_text);
    let last = entity.get("last_name").and_then(label_text);
    let label = match (first, last) {
        (Some(first), Some(last)) => format!("{} {}", first, last),
        (Some(name), None) | (None, Some(name)) => name,
        (None, None) => ["full_name", "email"]
            .iter()
            .find_map(|field| entity.get(*field).and_then(label_text))
            .unwrap_or_else(|| value.to_string()),
    };

    Some(SelectOption { value, label })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_course_content_chain_shape() {
        let chain = FormKind::CourseContent.chain();
        let keys: Vec<&str> = chain.iter().map(|(spec, _)| spec.key).collect();
        assert_eq!(keys, vec!["course", "chapter", "content"]);
        assert_eq!(
            chain.spec(1).unwrap().endpoint,
            Endpoint::path("courses/{parent}/chapters")
        );
    }

    #[test]
    fn test_enrollment_chain_shape() {
        let chain = FormKind::Enrollment.chain();
        assert_eq!(chain.len(), 4);
        assert_eq!(
            chain.spec(1).unwrap().endpoint,
            Endpoint::query("programs", "organization_id")
        );
    }

    #[test]
    fn test_chapter_mapping_uses_chapter_fields() {
        let chain = FormKind::CourseContent.chain();
        let spec = chain.spec(1).unwrap();
        assert_eq!(
            spec.extractor
                .extract(&json!({"chapter_id": 5, "chapter_name": "Ch5"})),
            Some(SelectOption::new(5, "Ch5"))
        );
    }

    #[test]
    fn test_student_labels() {
        assert_eq!(
            student_option(&json!({"id": 1, "first_name": "Ada", "last_name": "Lovelace"})),
            Some(SelectOption::new(1, "Ada Lovelace"))
        );
        assert_eq!(
            student_option(&json!({"student_id": "s-2", "last_name": "Hopper"})),
            Some(SelectOption::new("s-2", "Hopper"))
        );
        assert_eq!(
            student_option(&json!({"id": 3, "full_name": " ", "email": "x@lms.test"})),
            Some(SelectOption::new(3, "x@lms.test"))
        );
        assert_eq!(
            student_option(&json!({"id": 4})),
            Some(SelectOption::new(4, "4"))
        );
        assert_eq!(student_option(&json!({"first_name": "No id"})), None);
    }

    #[test]
    fn test_student_envelope() {
        let chain = FormKind::Enrollment.chain();
        let spec = chain.spec(3).unwrap();
        let body = json!({"students": [{"id": 1, "first_name": "Ada"}]});
        assert_eq!(spec.envelope.locate(&body).map(|e| e.len()), Some(1));
    }
}
