//! Export document shapes
//!
//! These are the nested structures written to the object store. Field names
//! are serialized in PascalCase; `None` fields are omitted, child lists are
//! always present (possibly empty).

use crate::domain::ids::EntityId;
use crate::domain::rows::{ArticleRow, DetailRow, ProfileRow, ReportRow};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A report with its articles and social media profiles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ReportDocument {
    pub scoop_report_id: EntityId,
    pub case_id: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header_claimant: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header_client_file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header_client_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header_delta_file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header_service_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header_date_of_loss: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub footer_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject_identifiers: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub injury_information: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_internet_information: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity_indicators: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employment_summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub criminal_history: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub civil_history: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub financial_distress: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendations: Option<String>,
    pub show_recommendations: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identification: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub miscellaneous: Option<String>,
    pub deleted: bool,
    pub created_by_user: i32,
    pub created_on: NaiveDateTime,
    pub modified_by_user: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified_on: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disclaimer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report_summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub social_media_summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub online_sources_summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_information: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_finding_summary: Option<String>,
    pub show_disclaimer: bool,
    pub articles: Vec<ArticleDocument>,
    pub social_media_profiles: Vec<ProfileDocument>,
}

impl From<&ReportRow> for ReportDocument {
    fn from(r: &ReportRow) -> Self {
        Self {
            scoop_report_id: r.scoop_report_id,
            case_id: r.case_id,
            header_claimant: r.header_claimant.clone(),
            header_client_file: r.header_client_file.clone(),
            header_client_name: r.header_client_name.clone(),
            header_delta_file: r.header_delta_file.clone(),
            header_service_date: r.header_service_date.clone(),
            header_date_of_loss: r.header_date_of_loss.clone(),
            footer_message: r.footer_message.clone(),
            subject_identifiers: r.subject_identifiers.clone(),
            injury_information: r.injury_information.clone(),
            additional_internet_information: r.additional_internet_information.clone(),
            activity_indicators: r.activity_indicators.clone(),
            employment_summary: r.employment_summary.clone(),
            criminal_history: r.criminal_history.clone(),
            civil_history: r.civil_history.clone(),
            financial_distress: r.financial_distress.clone(),
            recommendations: r.recommendations.clone(),
            show_recommendations: r.show_recommendations,
            identification: r.identification.clone(),
            miscellaneous: r.miscellaneous.clone(),
            deleted: r.deleted,
            created_by_user: r.created_by_user,
            created_on: r.created_on,
            modified_by_user: r.modified_by_user,
            modified_on: r.modified_on,
            disclaimer: r.disclaimer.clone(),
            report_summary: r.report_summary.clone(),
            social_media_summary: r.social_media_summary.clone(),
            online_sources_summary: r.online_sources_summary.clone(),
            contact_information: r.contact_information.clone(),
            key_finding_summary: r.key_finding_summary.clone(),
            show_disclaimer: r.show_disclaimer,
            articles: Vec::new(),
            social_media_profiles: Vec::new(),
        }
    }
}

/// An article nested under its report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ArticleDocument {
    pub scoop_report_article_id: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub article_date: Option<NaiveDateTime>,
    pub deleted: bool,
    pub created_by_user: i32,
    pub created_on: NaiveDateTime,
    pub modified_by_user: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified_on: Option<NaiveDateTime>,
    pub is_key_finding: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_finding_content: Option<String>,
}

impl From<&ArticleRow> for ArticleDocument {
    fn from(r: &ArticleRow) -> Self {
        Self {
            scoop_report_article_id: r.scoop_report_article_id,
            title: r.title.clone(),
            url: r.url.clone(),
            summary: r.summary.clone(),
            article_date: r.article_date,
            deleted: r.deleted,
            created_by_user: r.created_by_user,
            created_on: r.created_on,
            modified_by_user: r.modified_by_user,
            modified_on: r.modified_on,
            is_key_finding: r.is_key_finding,
            key_finding_content: r.key_finding_content.clone(),
        }
    }
}

/// A social media profile nested under its report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProfileDocument {
    pub scoop_report_social_media_profile_id: i32,
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
    pub profile_details: Vec<ProfileDetailDocument>,
}

impl From<&ProfileRow> for ProfileDocument {
    fn from(r: &ProfileRow) -> Self {
        Self {
            scoop_report_social_media_profile_id: r.scoop_report_social_media_profile_id,
            url: r.url.clone(),
            social_network_type_id: r.social_network_type_id,
            profile_summary: r.profile_summary.clone(),
            relationship: r.relationship.clone(),
            last_activity_date: r.last_activity_date,
            deleted: r.deleted,
            created_by_user: r.created_by_user,
            created_on: r.created_on,
            modified_by_user: r.modified_by_user,
            modified_on: r.modified_on,
            profile_details: Vec::new(),
        }
    }
}

/// A profile detail nested under its profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProfileDetailDocument {
    pub scoop_report_social_media_profile_detail_id: i32,
    pub description: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity_date: Option<NaiveDateTime>,
    pub deleted: bool,
    pub created_by_user: i32,
    pub created_on: NaiveDateTime,
    pub modified_by_user: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified_on: Option<NaiveDateTime>,
    pub is_key_finding: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_finding_content: Option<String>,
}

impl From<&DetailRow> for ProfileDetailDocument {
    fn from(r: &DetailRow) -> Self {
        Self {
            scoop_report_social_media_profile_detail_id: r
                .scoop_report_social_media_profile_detail_id,
            description: r.description.clone(),
            content: r.content.clone(),
            activity_date: r.activity_date,
            deleted: r.deleted,
            created_by_user: r.created_by_user,
            created_on: r.created_on,
            modified_by_user: r.modified_by_user,
            modified_on: r.modified_on,
            is_key_finding: r.is_key_finding,
            key_finding_content: r.key_finding_content.clone(),
        }
    }
}
