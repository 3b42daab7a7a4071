use std::fmt::Write;

use crate::core::time::format_offset;
use crate::schemas::{Challenge, Submission, User};
use crate::workflow::form::form_spec;
use crate::workflow::result::{percentage, ResultView};

pub(crate) fn render_challenge_list(challenges: &[Challenge]) -> String {
    if challenges.is_empty() {
        return "No challenges found matching your criteria.\n".to_string();
    }

    let mut out = String::new();
    for challenge in challenges {
        let _ = writeln!(
            out,
            "{}  [{} / {}]  {} pts\n    {}\n    {}",
            challenge.id,
            challenge.category.as_str(),
            challenge.difficulty.as_str(),
            challenge.points,
            challenge.title,
            first_line(&challenge.description),
        );
    }
    out
}

pub(crate) fn render_challenge_detail(challenge: &Challenge) -> String {
    let spec = form_spec(challenge.category);
    let mut out = String::new();
    let _ = writeln!(out, "{}", challenge.title);
    let _ = writeln!(
        out,
        "category: {}  difficulty: {}  points: {}  time limit: {} min",
        challenge.category.as_str(),
        challenge.difficulty.as_str(),
        challenge.points,
        challenge.time_limit,
    );
    let _ = writeln!(out, "\n{}", challenge.description);

    if let Some(snippet) = &challenge.code_snippet {
        let _ = writeln!(out, "\nChallenge Code:");
        let _ = writeln!(out, "{}", indented(snippet));
    }

    let _ = writeln!(out, "\nRequired input: {}", spec.input_label);
    let _ = writeln!(out, "  {}", spec.placeholder);
    if !spec.grading_criteria.is_empty() {
        let _ = writeln!(out, "Grading Criteria:");
        for criterion in spec.grading_criteria {
            let _ = writeln!(out, "  - {criterion}");
        }
    }
    out
}

pub(crate) fn render_submission_history(submissions: &[Submission]) -> String {
    if submissions.is_empty() {
        return "No submissions yet.\n".to_string();
    }

    let mut out = String::new();
    for submission in submissions {
        let percent = percentage(submission.score, submission.max_score);
        let _ = writeln!(
            out,
            "{}  {}  {}%  {}",
            submission.id,
            format_offset(submission.submitted_at),
            percent,
            if submission.is_correct { "correct" } else { "incorrect" },
        );
    }
    out
}

pub(crate) fn render_result(view: &ResultView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Submission Results: {}", view.challenge_title);
    let _ = writeln!(out, "Submitted at {}", format_offset(view.submitted_at));
    let _ = writeln!(
        out,
        "\n  {}%  ({})\n  Score: {} / {} points",
        view.percentage,
        view.band.label(),
        view.score,
        view.max_score,
    );
    if view.is_correct {
        let _ = writeln!(out, "  Challenge Completed!");
    }

    if let Some(feedback) = &view.feedback {
        let _ = writeln!(out, "\nAI Feedback:");
        let _ = writeln!(out, "{}", indented(feedback));
    }

    if !view.grading_details.is_empty() {
        let _ = writeln!(out, "\nDetailed Breakdown:");
        for (key, value) in &view.grading_details {
            let _ = writeln!(out, "  {key}: {value}");
        }
    }

    if view.code.is_some() || view.explanation.is_some() {
        let _ = writeln!(out, "\nYour Submission:");
        if let Some(code) = &view.code {
            let _ = writeln!(out, "  Code:");
            let _ = writeln!(out, "{}", indented(code));
        }
        if let Some(explanation) = &view.explanation {
            let _ = writeln!(out, "  Explanation:");
            let _ = writeln!(out, "{}", indented(explanation));
        }
    }

    let _ = writeln!(out, "\nBrowse more challenges with `codecraft challenges`.");
    out
}

pub(crate) fn render_user(user: &User) -> String {
    format!(
        "{} <{}>  skill level {}  joined {}\n",
        user.username,
        user.email,
        user.skill_level,
        format_offset(user.created_at),
    )
}

fn first_line(text: &str) -> &str {
    text.lines().next().unwrap_or_default()
}

fn indented(text: &str) -> String {
    text.lines().map(|line| format!("    {line}")).collect::<Vec<_>>().join("\n")
}
