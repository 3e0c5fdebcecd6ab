use serde_json::{Value, json};
use skilltree_transcript::{TranscriptRequest, UserIdentity};

pub fn request() -> TranscriptRequest {
    TranscriptRequest::new("proj1", UserIdentity::new("joe").with_nickname("Joe Doe"))
}

pub fn skill_name(subject: usize, skill: usize) -> String {
    format!("S{} Skill {}", subject, skill)
}

/// Subject `index` (1-based) with `skills` skills of 100 points, the first `completed` of them earned.
pub fn subject_summary(index: usize, skills: usize, completed: usize) -> Value {
    let skill_list: Vec<Value> = (1..=skills)
        .map(|i| {
            let points = if i <= completed { 100 } else { 0 };
            json!({
                "skillId": format!("skill{}_{}", index, i),
                "skill": skill_name(index, i),
                "points": points,
                "totalPoints": 100,
            })
        })
        .collect();
    let level = if completed > 0 { 1 } else { 0 };
    json!({
        "subjectId": format!("subj{}", index),
        "subject": format!("Subject {}", index),
        "skillsLevel": level,
        "totalLevels": 5,
        "points": completed * 100,
        "totalPoints": skills * 100,
        "skills": skill_list,
    })
}

pub fn badge(name: &str, achieved: bool, date: Option<&str>) -> Value {
    json!({
        "badgeId": name.to_lowercase().replace(' ', ""),
        "badge": name,
        "badgeAchieved": achieved,
        "dateAchieved": date,
    })
}

/// A progress document with one subject per `(skills, completed)` pair.
pub fn progress(subjects: &[(usize, usize)], badges: Vec<Value>) -> Value {
    let mut summaries = serde_json::Map::new();
    let mut listed = Vec::new();
    for (i, (skills, completed)) in subjects.iter().enumerate() {
        let index = i + 1;
        summaries.insert(format!("subj{}", index), subject_summary(index, *skills, *completed));
        listed.push(json!({ "subjectId": format!("subj{}", index), "subject": format!("Subject {}", index) }));
    }
    let total_points: usize = subjects.iter().map(|(skills, _)| skills * 100).sum();
    let points: usize = subjects.iter().map(|(_, completed)| completed * 100).sum();

    json!({
        "projectSummary": {
            "projectName": "Has Subject and Skills",
            "skillsLevel": 1,
            "totalLevels": 5,
            "points": points,
            "totalPoints": total_points,
            "subjects": listed,
        },
        "subjectSummaries": summaries,
        "badgeSummaries": badges,
    })
}
