//! Verb catalog: canonical identifiers for learning activity actions
//!
//! Each verb carries an xAPI sub-record and, where a mapping has been
//! authored, a Caliper sub-record. A missing Caliper record is a deliberate
//! per-verb authoring choice: projectors fall back to the xAPI identifier
//! as the Caliper action.

/// The catalog entry for a verb in one output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerbFormat {
    /// Canonical identifier (IRI) of the verb
    pub id: &'static str,
    /// Display name (en-US)
    pub display: &'static str,
    /// Human-readable description of when the verb applies
    pub description: &'static str,
}

/// A verb catalog entry with its per-format sub-records
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerbDef {
    /// Catalog name of the verb (e.g. `CREATED`)
    pub key: &'static str,
    /// xAPI sub-record, always present
    pub xapi: VerbFormat,
    /// Caliper sub-record, present only where a mapping has been authored
    pub caliper: Option<VerbFormat>,
}

impl VerbDef {
    /// The identifier to use as a Caliper action: the Caliper id when the
    /// catalog defines one, the xAPI id otherwise.
    pub fn caliper_action(&self) -> &'static str {
        self.caliper.map_or(self.xapi.id, |format| format.id)
    }
}

pub const ACCESSED: VerbDef = VerbDef {
    key: "ACCESSED",
    xapi: VerbFormat {
        id: "http://activitystrea.ms/schema/1.0/access",
        display: "accessed",
        description: "Indicates that the actor has accessed the object. For instance, a person accessing a room, or accessing a file.",
    },
    caliper: None,
};

pub const COMMENTED: VerbDef = VerbDef {
    key: "COMMENTED",
    xapi: VerbFormat {
        id: "http://adlnet.gov/expapi/verbs/commented",
        display: "commented",
        description: "Offered an opinion or written experience of the activity. Can be used with the learner as the actor or a system as an actor. Comments can be sent from either party with the idea that the other will read and react to the content.",
    },
    caliper: None,
};

pub const CREATED: VerbDef = VerbDef {
    key: "CREATED",
    xapi: VerbFormat {
        id: "http://activitystrea.ms/schema/1.0/create",
        display: "created",
        description: "Indicates that the actor has created the object.",
    },
    caliper: None,
};

pub const LOGGED_IN: VerbDef = VerbDef {
    key: "LOGGED_IN",
    xapi: VerbFormat {
        id: "https://brindlewaye.com/xAPITerms/verbs/loggedin",
        display: "logged in",
        description: "Logged in to some service.",
    },
    caliper: Some(VerbFormat {
        id: "http://purl.imsglobal.org/vocab/caliper/v1/action#LoggedIn",
        display: "Logged In",
        description: "Action indicating log in to start a session",
    }),
};

pub const LOGGED_OUT: VerbDef = VerbDef {
    key: "LOGGED_OUT",
    xapi: VerbFormat {
        id: "https://brindlewaye.com/xAPITerms/verbs/loggedout/",
        display: "logged out",
        description: "Logged out of some service.",
    },
    caliper: Some(VerbFormat {
        id: "http://purl.imsglobal.org/vocab/caliper/v1/action#LoggedOut",
        display: "Logged Out",
        description: "Actor initiates end of session",
    }),
};

pub const PREVIEWED: VerbDef = VerbDef {
    key: "PREVIEWED",
    xapi: VerbFormat {
        id: "http://id.tincanapi.com/verb/previewed",
        display: "previewed",
        description: "Indicates that the actor took a quick, cursory or preliminary look at the object.",
    },
    caliper: None,
};

pub const READ: VerbDef = VerbDef {
    key: "READ",
    xapi: VerbFormat {
        id: "http://activitystrea.ms/schema/1.0/read",
        display: "read",
        description: "Indicates that the actor read the object. This is typically only applicable for objects representing printed or written content, such as a book, a message or a comment.",
    },
    caliper: None,
};

pub const REGISTERED: VerbDef = VerbDef {
    key: "REGISTERED",
    xapi: VerbFormat {
        id: "http://adlnet.gov/expapi/verbs/registered",
        display: "registered",
        description: "Indicates the actor registered for a learning activity or course.",
    },
    caliper: None,
};

pub const SCORED: VerbDef = VerbDef {
    key: "SCORED",
    xapi: VerbFormat {
        id: "http://adlnet.gov/expapi/verbs/scored",
        display: "scored",
        description: "A measure related to the learner's performance, typically between either 0 and 1 or 0 and 100, which corresponds to a learner's performance on an activity.",
    },
    caliper: None,
};

pub const STARTED: VerbDef = VerbDef {
    key: "STARTED",
    xapi: VerbFormat {
        id: "http://activitystrea.ms/schema/1.0/start",
        display: "started",
        description: "Indicates that the actor has started the object. For instance, when a person starts a project.",
    },
    caliper: None,
};

pub const SUBMITTED: VerbDef = VerbDef {
    key: "SUBMITTED",
    xapi: VerbFormat {
        id: "http://activitystrea.ms/schema/1.0/submit",
        display: "submitted",
        description: "Indicates that the actor has submitted the object. If a target is specified, it indicates the entity to which the object was submitted.",
    },
    caliper: None,
};

pub const UNREGISTERED: VerbDef = VerbDef {
    key: "UNREGISTERED",
    xapi: VerbFormat {
        id: "http://id.tincanapi.com/verb/unregistered",
        display: "unregistered",
        description: "Indicates the actor unregistered from a learning activity or course.",
    },
    caliper: None,
};

pub const VIEWED: VerbDef = VerbDef {
    key: "VIEWED",
    xapi: VerbFormat {
        id: "http://id.tincanapi.com/verb/viewed",
        display: "viewed",
        description: "Indicates that the actor has viewed the object.",
    },
    caliper: None,
};
