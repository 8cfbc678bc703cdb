pub mod report;

pub use report::{
    CompletedSection, QueryOutcome, ResearchQuery, ResearchResult, Section, SectionPlan,
    SectionType,
};
