//! Aggregation of case rows into the dashboard record.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use chrono::NaiveDate;

use casestats_domain::age::AgeBracket;
use casestats_domain::case::CaseRecord;
use casestats_domain::counts::Counts;
use casestats_domain::dashboard::DashboardData;
use casestats_domain::filter::CaseFilter;

/// Number of cities kept in `top_cities`.
pub const TOP_CITIES: usize = 10;

/// Aggregate `records` under `filter`.
///
/// Filters apply in stages: department first, then city and gender.
/// `available_departments` is computed before any filtering;
/// `available_cities` after the department filter only, so the city
/// dropdown follows the selected department.
#[must_use]
pub fn summarize(records: &[CaseRecord], filter: &CaseFilter) -> DashboardData {
    let mut data = DashboardData {
        available_departments: Some(distinct(records.iter().filter_map(CaseRecord::department))),
        ..DashboardData::default()
    };

    let in_department: Vec<&CaseRecord> = records
        .iter()
        .filter(|r| {
            filter
                .department
                .as_deref()
                .is_none_or(|d| r.department() == Some(d))
        })
        .collect();

    data.available_cities = Some(distinct(in_department.iter().filter_map(|r| r.city())));

    let wanted_gender = filter.gender.as_deref().map(str::to_uppercase);
    let selected: Vec<&CaseRecord> = in_department
        .into_iter()
        .filter(|r| filter.city.as_deref().is_none_or(|c| r.city() == Some(c)))
        .filter(|r| {
            wanted_gender
                .as_deref()
                .is_none_or(|g| r.gender().as_deref() == Some(g))
        })
        .collect();

    if selected.is_empty() {
        return data;
    }

    data.total_cases = selected.len() as u64;
    data.total_deaths = selected.iter().filter(|r| r.is_deceased()).count() as u64;
    data.cases_by_status = Counts::ranked(tally(selected.iter().filter_map(|r| r.status())));

    let mut top_cities = Counts::ranked(tally(
        selected.iter().filter_map(|r| r.city().map(str::to_string)),
    ));
    top_cities.truncate(TOP_CITIES);
    data.top_cities = top_cities;

    data.age_distribution = age_distribution(&selected);
    data.gender_distribution = Counts::ranked(tally(selected.iter().filter_map(|r| r.gender())));
    data.deaths_over_time = deaths_over_time(&selected);

    data
}

fn distinct<'a>(names: impl Iterator<Item = &'a str>) -> Vec<String> {
    names
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

fn tally(labels: impl Iterator<Item = String>) -> HashMap<String, u64> {
    let mut counts = HashMap::new();
    for label in labels {
        *counts.entry(label).or_insert(0) += 1;
    }
    counts
}

/// Every bracket in order, including empty ones.
fn age_distribution(rows: &[&CaseRecord]) -> Counts {
    let mut per_bracket: BTreeMap<AgeBracket, u64> =
        AgeBracket::ALL.iter().map(|b| (*b, 0)).collect();
    for bracket in rows.iter().filter_map(|r| r.age_bracket()) {
        *per_bracket.entry(bracket).or_insert(0) += 1;
    }
    per_bracket
        .into_iter()
        .map(|(bracket, count)| (bracket.label(), count))
        .collect()
}

/// Deaths per calendar day, ascending.
fn deaths_over_time(rows: &[&CaseRecord]) -> Counts {
    let mut per_day: BTreeMap<NaiveDate, u64> = BTreeMap::new();
    for day in rows
        .iter()
        .filter(|r| r.is_deceased())
        .filter_map(|r| r.death_date())
    {
        *per_day.entry(day).or_insert(0) += 1;
    }
    per_day
        .into_iter()
        .map(|(day, count)| (day.format("%Y-%m-%d").to_string(), count))
        .collect()
}
