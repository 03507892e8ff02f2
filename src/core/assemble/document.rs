//! Nested document assembly
//!
//! Assembly is a pure function of the fetched rows. Children are attached by
//! exact identity match, sorted by their own identity; a child whose owner is
//! not in the page is dropped.

use crate::domain::document::{
    ArticleDocument, ProfileDetailDocument, ProfileDocument, ReportDocument,
};
use crate::domain::ids::EntityId;
use crate::domain::rows::{ArticleRow, ChildRows, DetailRow, ProfileRow, ReportRow};
use std::collections::HashMap;

/// Assemble one report with the children that belong to it
///
/// `children` may hold rows of other reports; they are ignored.
pub fn assemble_document(report: &ReportRow, children: &ChildRows) -> ReportDocument {
    let profile_ids: Vec<i32> = children
        .profiles
        .iter()
        .filter(|p| p.scoop_report_id == report.scoop_report_id)
        .map(|p| p.scoop_report_social_media_profile_id)
        .collect();

    let mut document = ReportDocument::from(report);
    document.articles = articles_of(
        children
            .articles
            .iter()
            .filter(|a| a.scoop_report_id == report.scoop_report_id),
    );
    document.social_media_profiles = profiles_with_details(
        children
            .profiles
            .iter()
            .filter(|p| p.scoop_report_id == report.scoop_report_id),
        children
            .details
            .iter()
            .filter(|d| profile_ids.contains(&d.scoop_report_social_media_profile_id)),
    );
    document
}

/// Assemble every report of a page, preserving the report order
///
/// Children are grouped once by owner so a page costs one pass per
/// collection regardless of how many reports it holds.
pub fn assemble_page(reports: &[ReportRow], children: &ChildRows) -> Vec<ReportDocument> {
    let mut articles: HashMap<EntityId, Vec<&ArticleRow>> = HashMap::new();
    for article in &children.articles {
        articles.entry(article.scoop_report_id).or_default().push(article);
    }

    let mut profiles: HashMap<EntityId, Vec<&ProfileRow>> = HashMap::new();
    for profile in &children.profiles {
        profiles.entry(profile.scoop_report_id).or_default().push(profile);
    }

    let mut details: HashMap<i32, Vec<&DetailRow>> = HashMap::new();
    for detail in &children.details {
        details
            .entry(detail.scoop_report_social_media_profile_id)
            .or_default()
            .push(detail);
    }

    reports
        .iter()
        .map(|report| {
            let id = report.scoop_report_id;
            let own_profiles = profiles.get(&id).map(Vec::as_slice).unwrap_or_default();
            let own_details = own_profiles.iter().flat_map(|p| {
                details
                    .get(&p.scoop_report_social_media_profile_id)
                    .map(Vec::as_slice)
                    .unwrap_or_default()
                    .iter()
                    .copied()
            });

            let mut document = ReportDocument::from(report);
            document.articles = articles_of(
                articles
                    .get(&id)
                    .map(Vec::as_slice)
                    .unwrap_or_default()
                    .iter()
                    .copied(),
            );
            document.social_media_profiles =
                profiles_with_details(own_profiles.iter().copied(), own_details);
            document
        })
        .collect()
}

fn articles_of<'a>(rows: impl Iterator<Item = &'a ArticleRow>) -> Vec<ArticleDocument> {
    let mut articles: Vec<ArticleDocument> = rows.map(ArticleDocument::from).collect();
    articles.sort_by_key(|a| a.scoop_report_article_id);
    articles
}

fn profiles_with_details<'a>(
    profiles: impl Iterator<Item = &'a ProfileRow>,
    details: impl Iterator<Item = &'a DetailRow>,
) -> Vec<ProfileDocument> {
    let mut documents: Vec<ProfileDocument> = profiles.map(ProfileDocument::from).collect();
    documents.sort_by_key(|p| p.scoop_report_social_media_profile_id);

    let index: HashMap<i32, usize> = documents
        .iter()
        .enumerate()
        .map(|(i, p)| (p.scoop_report_social_media_profile_id, i))
        .collect();

    for detail in details {
        // Orphans are dropped.
        if let Some(&i) = index.get(&detail.scoop_report_social_media_profile_id) {
            documents[i]
                .profile_details
                .push(ProfileDetailDocument::from(detail));
        }
    }

    for profile in &mut documents {
        profile
            .profile_details
            .sort_by_key(|d| d.scoop_report_social_media_profile_detail_id);
    }
    documents
}
