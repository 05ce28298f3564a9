//! HTML for the single job form.

use axum::response::Html;

use crate::domains::subscriptions::JobOutcome;

/// Result banner shown above the form after a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormBanner {
    /// Rejected before the platform was contacted
    Invalid,
    /// The job ran (or failed while running)
    Finished(JobOutcome),
}

pub fn render_form(banner: Option<FormBanner>) -> Html<String> {
    let banner = match banner {
        None => String::new(),
        Some(FormBanner::Invalid) => {
            r#"<p class="status error" data-status="error">error: invalid job parameters</p>"#
                .to_string()
        }
        Some(FormBanner::Finished(outcome)) => format!(
            r#"<p class="status {status}" data-status="{status}" data-count="{count}">{status}: {count} members updated</p>"#,
            status = outcome.status,
            count = outcome.count,
        ),
    };

    Html(format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8" />
    <title>Mailing list subscription toggle</title>
    <style>
        body {{ font-family: sans-serif; max-width: 32rem; margin: 2rem auto; }}
        label {{ display: block; margin-top: 0.75rem; }}
        .status.success {{ color: #1a7f37; }}
        .status.error {{ color: #cf222e; }}
    </style>
</head>
<body>
    <h1>Toggle list subscriptions</h1>
    {banner}
    <form method="post" action="/">
        <label>API key <input type="password" name="apiKey" required /></label>
        <label>List web id <input type="text" name="listId" inputmode="numeric" required /></label>
        <label>New status
            <select name="status">
                <option value="subscribed">subscribed</option>
                <option value="unsubscribed">unsubscribed</option>
            </select>
        </label>
        <label>Max members (optional) <input type="number" name="count" min="1" /></label>
        <button type="submit">Run</button>
    </form>
</body>
</html>
"#,
        banner = banner,
    ))
}
