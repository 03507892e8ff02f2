//! PostgreSQL row decoding
//!
//! Maps `tokio_postgres` rows onto the typed domain rows. Columns are looked
//! up by name, so the query files may select them in any order.

use crate::core::manifest::ManifestEntry;
use crate::domain::rows::{ArticleRow, DetailRow, ProfileRow, ReportRow};
use crate::domain::{RelexError, Result};
use chrono::{DateTime, Utc};
use tokio_postgres::types::FromSql;
use tokio_postgres::Row;

fn col<'a, T: FromSql<'a>>(row: &'a Row, name: &str) -> Result<T> {
    row.try_get(name)
        .map_err(|e| RelexError::Database(format!("Failed to decode column '{name}': {e}")))
}

fn non_negative(value: i64, name: &str) -> Result<u64> {
    u64::try_from(value)
        .map_err(|_| RelexError::Database(format!("Column '{name}' is negative: {value}")))
}

/// Decode a report row
pub fn report_from_row(row: &Row) -> Result<ReportRow> {
    Ok(ReportRow {
        scoop_report_id: col(row, "scoop_report_id")?,
        case_id: col(row, "case_id")?,
        header_claimant: col(row, "header_claimant")?,
        header_client_file: col(row, "header_client_file")?,
        header_client_name: col(row, "header_client_name")?,
        header_delta_file: col(row, "header_delta_file")?,
        header_service_date: col(row, "header_service_date")?,
        header_date_of_loss: col(row, "header_date_of_loss")?,
        footer_message: col(row, "footer_message")?,
        subject_identifiers: col(row, "subject_identifiers")?,
        injury_information: col(row, "injury_information")?,
        additional_internet_information: col(row, "additional_internet_information")?,
        activity_indicators: col(row, "activity_indicators")?,
        employment_summary: col(row, "employment_summary")?,
        criminal_history: col(row, "criminal_history")?,
        civil_history: col(row, "civil_history")?,
        financial_distress: col(row, "financial_distress")?,
        recommendations: col(row, "recommendations")?,
        show_recommendations: col(row, "show_recommendations")?,
        identification: col(row, "identification")?,
        miscellaneous: col(row, "miscellaneous")?,
        deleted: col(row, "deleted")?,
        created_by_user: col(row, "created_by_user")?,
        created_on: col(row, "created_on")?,
        modified_by_user: col(row, "modified_by_user")?,
        modified_on: col(row, "modified_on")?,
        disclaimer: col(row, "disclaimer")?,
        report_summary: col(row, "report_summary")?,
        social_media_summary: col(row, "social_media_summary")?,
        online_sources_summary: col(row, "online_sources_summary")?,
        contact_information: col(row, "contact_information")?,
        key_finding_summary: col(row, "key_finding_summary")?,
        show_disclaimer: col(row, "show_disclaimer")?,
    })
}

/// Decode an article row
pub fn article_from_row(row: &Row) -> Result<ArticleRow> {
    Ok(ArticleRow {
        scoop_report_article_id: col(row, "scoop_report_article_id")?,
        scoop_report_id: col(row, "scoop_report_id")?,
        title: col(row, "title")?,
        url: col(row, "url")?,
        summary: col(row, "summary")?,
        article_date: col(row, "article_date")?,
        deleted: col(row, "deleted")?,
        created_by_user: col(row, "created_by_user")?,
        created_on: col(row, "created_on")?,
        modified_by_user: col(row, "modified_by_user")?,
        modified_on: col(row, "modified_on")?,
        is_key_finding: col(row, "is_key_finding")?,
        key_finding_content: col(row, "key_finding_content")?,
    })
}

/// Decode a social media profile row
pub fn profile_from_row(row: &Row) -> Result<ProfileRow> {
    Ok(ProfileRow {
        scoop_report_social_media_profile_id: col(row, "scoop_report_social_media_profile_id")?,
        scoop_report_id: col(row, "scoop_report_id")?,
        url: col(row, "url")?,
        social_network_type_id: col(row, "social_network_type_id")?,
        profile_summary: col(row, "profile_summary")?,
        relationship: col(row, "relationship")?,
        last_activity_date: col(row, "last_activity_date")?,
        deleted: col(row, "deleted")?,
        created_by_user: col(row, "created_by_user")?,
        created_on: col(row, "created_on")?,
        modified_by_user: col(row, "modified_by_user")?,
        modified_on: col(row, "modified_on")?,
    })
}

/// Decode a profile detail row
pub fn detail_from_row(row: &Row) -> Result<DetailRow> {
    Ok(DetailRow {
        scoop_report_social_media_profile_detail_id: col(
            row,
            "scoop_report_social_media_profile_detail_id",
        )?,
        scoop_report_social_media_profile_id: col(row, "scoop_report_social_media_profile_id")?,
        description: col(row, "description")?,
        content: col(row, "content")?,
        activity_date: col(row, "activity_date")?,
        deleted: col(row, "deleted")?,
        created_by_user: col(row, "created_by_user")?,
        created_on: col(row, "created_on")?,
        modified_by_user: col(row, "modified_by_user")?,
        modified_on: col(row, "modified_on")?,
        is_key_finding: col(row, "is_key_finding")?,
        key_finding_content: col(row, "key_finding_content")?,
    })
}

/// Decode a manifest row
pub fn manifest_entry_from_row(row: &Row) -> Result<ManifestEntry> {
    let batch_number: i32 = col(row, "batch_number")?;
    let rows_exported: Option<i64> = col(row, "rows_exported")?;

    Ok(ManifestEntry {
        batch_number: u32::try_from(batch_number).map_err(|_| {
            RelexError::Database(format!("Column 'batch_number' is negative: {batch_number}"))
        })?,
        page_number: non_negative(col(row, "page_number")?, "page_number")?,
        page_index: non_negative(col(row, "page_index")?, "page_index")?,
        destination_key: col(row, "destination_key")?,
        success: col(row, "success")?,
        rows_exported: rows_exported
            .map(|v| non_negative(v, "rows_exported"))
            .transpose()?,
        error_message: col(row, "error_message")?,
        entity_id: col(row, "entity_id")?,
        created_at: col::<DateTime<Utc>>(row, "created_at")?,
        logged_at: col::<DateTime<Utc>>(row, "logged_at")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_negative() {
        assert_eq!(non_negative(42, "page_index").unwrap(), 42);

        let err = non_negative(-1, "page_index").unwrap_err();
        assert!(err.to_string().contains("page_index"));
    }
}
