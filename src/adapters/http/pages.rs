//! Form pages around the stream endpoint.

use super::AppState;
use axum::extract::{Query, State};
use axum::response::{Html, Redirect};
use axum::Form;
use serde::Deserialize;

const INDEX_SCRIPT: &str = r#"
const select = document.getElementById('job');
const fields = document.getElementById('job-fields');
const loadFields = () =>
    fetch('/job_fields?job=' + encodeURIComponent(select.value))
        .then((response) => response.text())
        .then((markup) => { fields.innerHTML = markup; });
select.addEventListener('change', loadFields);
loadFields();
"#;

const STREAM_SCRIPT: &str = r#"
const output = document.getElementById('output');
const params = new URLSearchParams({ job: output.dataset.job, path: output.dataset.path });
const source = new EventSource('/stream?' + params);
let received = false;
const append = (text, kind) => {
    const line = document.createElement('li');
    line.textContent = text;
    if (kind) line.className = kind;
    output.appendChild(line);
    received = true;
};
source.onmessage = (event) => append(event.data);
source.addEventListener('error', (event) => {
    if (event.data !== undefined) {
        append(event.data, 'error');
        return;
    }
    // A refused stream (500/503) fails the connection outright.
    if (source.readyState === EventSource.CLOSED && !received) {
        append('Stream unavailable.', 'error');
    }
    // Connection closed: the job is over, don't let the browser rerun it.
    source.close();
});
source.addEventListener('done', () => source.close());
"#;

#[derive(Debug, Deserialize)]
pub struct RunForm {
    #[serde(default)]
    job: String,
    #[serde(default)]
    path: String,
}

#[derive(Debug, Deserialize)]
pub struct JobFieldsRequest {
    #[serde(default)]
    job: String,
}

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let options = state
        .runner
        .registry()
        .jobs()
        .map(|job| {
            format!(
                r#"<option value="{}">{}</option>"#,
                escape_html(job.name()),
                escape_html(job.label())
            )
        })
        .collect::<String>();

    Html(format!(
        r#"<!doctype html>
<html>
    <head>
        <title>Run a job</title>
    </head>
    <body>
        <h1>Run a job</h1>
        <form action="/run" method="post">
            <div>
                <label>
                    Job:
                    <select id="job" name="job">{}</select>
                </label>
            </div>
            <div id="job-fields"></div>
            <div>
                <input type="submit" value="Run">
            </div>
        </form>
        <script>{}</script>
    </body>
</html>
"#,
        options, INDEX_SCRIPT
    ))
}

pub async fn run_redirect() -> Redirect {
    Redirect::to("/")
}

pub async fn run(Form(form): Form<RunForm>) -> Html<String> {
    Html(format!(
        r#"<!doctype html>
<html>
    <head>
        <title>Running {job}</title>
    </head>
    <body>
        <h1>Running {job}</h1>
        <ul id="output" data-job="{job}" data-path="{path}"></ul>
        <a href="/">Back</a>
        <script>{script}</script>
    </body>
</html>
"#,
        job = escape_html(&form.job),
        path = escape_html(&form.path),
        script = STREAM_SCRIPT
    ))
}

pub async fn job_fields_query(
    State(state): State<AppState>,
    Query(request): Query<JobFieldsRequest>,
) -> Html<&'static str> {
    Html(state.runner.registry().fields(&request.job))
}

pub async fn job_fields_form(
    State(state): State<AppState>,
    Form(request): Form<JobFieldsRequest>,
) -> Html<&'static str> {
    Html(state.runner.registry().fields(&request.job))
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    escaped
}
