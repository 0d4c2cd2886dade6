//! Activity type catalog: tags classifying the kind of object a statement
//! is about

/// A catalog entry describing one activity type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivityTypeDef {
    /// Canonical identifier (IRI) of the activity type
    pub id: &'static str,
    /// Display name (en-US)
    pub name: &'static str,
    /// Human-readable description
    pub description: &'static str,
}

pub const ASSESSMENT: ActivityTypeDef = ActivityTypeDef {
    id: "http://adlnet.gov/expapi/activities/assessment",
    name: "assessment",
    description: "An assessment is an activity that determines a learner's mastery of a particular subject area. An assessment typically has one or more questions.",
};

pub const COURSE: ActivityTypeDef = ActivityTypeDef {
    id: "http://adlnet.gov/expapi/activities/course",
    name: "course",
    description: "A course represents an entire \"content package\" worth of material. The largest level of granularity. Unless flat, a course consists of multiple modules. A course is not content.",
};

pub const DISCUSSION: ActivityTypeDef = ActivityTypeDef {
    id: "http://id.tincanapi.com/activitytype/discussion",
    name: "discussion",
    description: "Represents an ongoing conversation between persons, such as an email thread or a forum topic.",
};

pub const FILE: ActivityTypeDef = ActivityTypeDef {
    id: "http://activitystrea.ms/schema/1.0/file",
    name: "file",
    description: "Represents any form of document or file. Objects of this type MAY contain an additional fileUrl property whose value is a dereferenceable IRI that can be used to retrieve the file, and an additional mimeType property whose value is the MIME type of the file.",
};

pub const PAGE: ActivityTypeDef = ActivityTypeDef {
    id: "http://activitystrea.ms/schema/1.0/page",
    name: "page",
    description: "Represents an area, typically a web page, that is representative of, and generally managed by, a particular entity.",
};
