//! Typed source rows
//!
//! One struct per query shape. Rows are decoded once by the row source and
//! never mutated afterwards; the assembler borrows them to build documents.

use crate::domain::ids::EntityId;
use chrono::NaiveDateTime;

/// A scoop report, the parent entity of every export document
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    pub scoop_report_id: EntityId,
    pub case_id: i32,
    pub header_claimant: Option<String>,
    pub header_client_file: Option<String>,
    pub header_client_name: Option<String>,
    pub header_delta_file: Option<String>,
    pub header_service_date: Option<String>,
    pub header_date_of_loss: Option<String>,
    pub footer_message: Option<String>,
    pub subject_identifiers: Option<String>,
    pub injury_information: Option<String>,
    pub additional_internet_information: Option<String>,
    pub activity_indicators: Option<String>,
    pub employment_summary: Option<String>,
    pub criminal_history: Option<String>,
    pub civil_history: Option<String>,
    pub financial_distress: Option<String>,
    pub recommendations: Option<String>,
    pub show_recommendations: bool,
    pub identification: Option<String>,
    pub miscellaneous: Option<String>,
    pub deleted: bool,
    pub created_by_user: i32,
    pub created_on: NaiveDateTime,
    pub modified_by_user: i32,
    pub modified_on: Option<NaiveDateTime>,
    pub disclaimer: Option<String>,
    pub report_summary: Option<String>,
    pub social_media_summary: Option<String>,
    pub online_sources_summary: Option<String>,
    pub contact_information: Option<String>,
    pub key_finding_summary: Option<String>,
    pub show_disclaimer: bool,
}

/// An article attached to a report
#[derive(Debug, Clone, PartialEq)]
pub struct ArticleRow {
    pub scoop_report_article_id: i32,
    pub scoop_report_id: EntityId,
    pub title: Option<String>,
    pub url: Option<String>,
    pub summary: Option<String>,
    pub article_date: Option<NaiveDateTime>,
    pub deleted: bool,
    pub created_by_user: i32,
    pub created_on: NaiveDateTime,
    pub modified_by_user: i32,
    pub modified_on: Option<NaiveDateTime>,
    pub is_key_finding: bool,
    pub key_finding_content: Option<String>,
}

/// A social media profile attached to a report
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileRow {
    pub scoop_report_social_media_profile_id: i32,
    pub scoop_report_id: EntityId,
    pub url: String,
    pub social_network_type_id: i32,
    pub profile_summary: String,
    pub relationship: String,
    pub last_activity_date: NaiveDateTime,
    pub deleted: bool,
    pub created_by_user: i32,
    pub created_on: NaiveDateTime,
    pub modified_by_user: i32,
    pub modified_on: NaiveDateTime,
}

/// A detail line attached to a social media profile
#[derive(Debug, Clone, PartialEq)]
pub struct DetailRow {
    pub scoop_report_social_media_profile_detail_id: i32,
    pub scoop_report_social_media_profile_id: i32,
    pub description: String,
    pub content: String,
    pub activity_date: Option<NaiveDateTime>,
    pub deleted: bool,
    pub created_by_user: i32,
    pub created_on: NaiveDateTime,
    pub modified_by_user: i32,
    pub modified_on: Option<NaiveDateTime>,
    pub is_key_finding: bool,
    pub key_finding_content: Option<String>,
}

/// Child rows fetched alongside one or more reports
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChildRows {
    pub articles: Vec<ArticleRow>,
    pub profiles: Vec<ProfileRow>,
    pub details: Vec<DetailRow>,
}

impl ChildRows {
    /// Total number of child rows across all collections
    pub fn len(&self) -> usize {
        self.articles.len() + self.profiles.len() + self.details.len()
    }

    /// Whether no child rows were fetched
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use chrono::NaiveDate;

    pub fn timestamp() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap()
    }

    pub fn report(id: EntityId) -> ReportRow {
        ReportRow {
            scoop_report_id: id,
            case_id: id * 10,
            header_claimant: Some(format!("Claimant {id}")),
            header_client_file: None,
            header_client_name: None,
            header_delta_file: None,
            header_service_date: None,
            header_date_of_loss: None,
            footer_message: None,
            subject_identifiers: None,
            injury_information: None,
            additional_internet_information: None,
            activity_indicators: None,
            employment_summary: None,
            criminal_history: None,
            civil_history: None,
            financial_distress: None,
            recommendations: None,
            show_recommendations: false,
            identification: None,
            miscellaneous: None,
            deleted: false,
            created_by_user: 1,
            created_on: timestamp(),
            modified_by_user: 1,
            modified_on: None,
            disclaimer: None,
            report_summary: None,
            social_media_summary: None,
            online_sources_summary: None,
            contact_information: None,
            key_finding_summary: None,
            show_disclaimer: true,
        }
    }

    pub fn article(id: i32, report_id: EntityId) -> ArticleRow {
        ArticleRow {
            scoop_report_article_id: id,
            scoop_report_id: report_id,
            title: Some(format!("Article {id}")),
            url: None,
            summary: None,
            article_date: None,
            deleted: false,
            created_by_user: 1,
            created_on: timestamp(),
            modified_by_user: 1,
            modified_on: None,
            is_key_finding: false,
            key_finding_content: None,
        }
    }

    pub fn profile(id: i32, report_id: EntityId) -> ProfileRow {
        ProfileRow {
            scoop_report_social_media_profile_id: id,
            scoop_report_id: report_id,
            url: format!("https://social.example/{id}"),
            social_network_type_id: 2,
            profile_summary: String::new(),
            relationship: "self".to_string(),
            last_activity_date: timestamp(),
            deleted: false,
            created_by_user: 1,
            created_on: timestamp(),
            modified_by_user: 1,
            modified_on: timestamp(),
        }
    }

    pub fn detail(id: i32, profile_id: i32) -> DetailRow {
        DetailRow {
            scoop_report_social_media_profile_detail_id: id,
            scoop_report_social_media_profile_id: profile_id,
            description: format!("Detail {id}"),
            content: String::new(),
            activity_date: None,
            deleted: false,
            created_by_user: 1,
            created_on: timestamp(),
            modified_by_user: 1,
            modified_on: None,
            is_key_finding: false,
            key_finding_content: None,
        }
    }
}
