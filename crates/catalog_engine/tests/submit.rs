use std::sync::Arc;

use catalog_core::{
    parse_reference, Problem, ProblemType, Source, SubmissionDetails, Submitter,
};
use catalog_engine::{
    ApiError, CodeforcesApi, FetchSettings, FixedSeed, KattisClient, KattisPage, MemoryStore,
    PageExtractor, ProblemStore, ReqwestFetcher, SubmissionService, SubmitError,
};
use chrono::{DateTime, TimeZone, Utc};
use pretty_assertions::assert_eq;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 4, 10, 30, 0).unwrap()
}

fn service(server: &MockServer, store: Arc<dyn ProblemStore>) -> SubmissionService {
    let fetcher = Arc::new(ReqwestFetcher::new(FetchSettings::default()));
    SubmissionService::new(store, fetcher.clone())
        .with_codeforces(
            CodeforcesApi::new(fetcher.clone()).with_base_url(format!("{}/api", server.uri())),
        )
        .with_kattis(KattisClient::new(fetcher).with_base_url(server.uri()))
        .with_clock(Arc::new(fixed_now))
}

fn details(submitter: &str, estimate: Option<f64>, tags: &[&str]) -> SubmissionDetails {
    SubmissionDetails {
        submitter: submitter.to_string(),
        estimated_difficulty: estimate,
        tags: tags.iter().map(|t| t.to_string()).collect(),
        kind: None,
    }
}

fn standings(problems: &str) -> String {
    format!(
        r#"{{"status":"OK","result":{{"contest":{{"id":1794,"name":"Round"}},"problems":{problems},"rows":[]}}}}"#
    )
}

#[tokio::test]
async fn codeforces_submission_uses_api_metadata() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/contest.standings"))
        .and(query_param("contestId", "1794"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            standings(
                r#"[{"contestId":1794,"index":"D","name":"Counting Factorizations","rating":1900,"tags":["math","dp"]},
                    {"contestId":1794,"index":"E","name":"Labeling the Tree with Distances","rating":2600,"tags":["hashing","trees"]}]"#,
            ),
            "application/json",
        ))
        .expect(1)
        .mount(&server)
        .await;

    let store = Arc::new(MemoryStore::new());
    let reference = parse_reference(Source::Codeforces, "CF1794E").unwrap();
    let added = service(&server, store.clone())
        .submit(&reference, &details("tourist", None, &["Graphs"]))
        .await
        .unwrap();

    let expected = Problem {
        identifier: "1794E".to_string(),
        name: "Labeling the Tree with Distances".to_string(),
        tags: vec!["graphs".to_string(), "hashing".to_string(), "trees".to_string()],
        difficulty: Some(2600),
        source_url: "https://codeforces.com/contest/1794/problem/E".to_string(),
        solved_count: 0,
        added_on: fixed_now(),
        submitter: Submitter {
            name: "tourist".to_string(),
            profile_url: "https://codeforces.com/profile/tourist".to_string(),
        },
        likes: 0,
        dislikes: 0,
        kind: None,
    };
    assert_eq!(added, expected);
    assert_eq!(store.get("1794E").await.unwrap(), Some(expected));
}

#[tokio::test]
async fn unrated_codeforces_problem_falls_back_to_estimate() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/contest.standings"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            standings(r#"[{"index":"A","name":"Fresh","tags":[]}]"#),
            "application/json",
        ))
        .mount(&server)
        .await;

    let store = Arc::new(MemoryStore::new());
    let reference = parse_reference(Source::Codeforces, "CF2000A").unwrap();
    let added = service(&server, store)
        .submit(&reference, &details("", Some(10.0), &[]))
        .await
        .unwrap();

    assert_eq!(added.difficulty, Some(3500));
    assert_eq!(added.submitter.name, "anonymous");
}

#[tokio::test]
async fn gym_problem_missing_from_standings_gets_placeholder() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/contest.standings"))
        .and(query_param("contestId", "104114"))
        .and(query_param("gym", "true"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(standings("[]"), "application/json"),
        )
        .mount(&server)
        .await;

    let store = Arc::new(MemoryStore::new());
    let reference = parse_reference(Source::Codeforces, "GYM104114C").unwrap();
    let added = service(&server, store)
        .submit(&reference, &details("camc", None, &[]))
        .await
        .unwrap();

    assert_eq!(added.identifier, "G104114C");
    assert_eq!(added.name, "Problem C from Gym Contest 104114");
    assert_eq!(added.tags, vec!["gym".to_string()]);
    assert_eq!(added.difficulty, None);
    assert_eq!(added.source_url, "https://codeforces.com/gym/104114/problem/C");
}

#[tokio::test]
async fn missing_contest_problem_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/contest.standings"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(standings("[]"), "application/json"),
        )
        .mount(&server)
        .await;

    let store = Arc::new(MemoryStore::new());
    let reference = parse_reference(Source::Codeforces, "CF1794Z").unwrap();
    let err = service(&server, store.clone())
        .submit(&reference, &SubmissionDetails::default())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        SubmitError::Api(ApiError::MissingProblem { .. })
    ));
    assert!(store.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn api_rejection_carries_its_comment() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/contest.standings"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{"status":"FAILED","comment":"contestId: Contest with id 99999 not found"}"#,
            "application/json",
        ))
        .mount(&server)
        .await;

    let store = Arc::new(MemoryStore::new());
    let reference = parse_reference(Source::Codeforces, "CF99999A").unwrap();
    let err = service(&server, store)
        .submit(&reference, &SubmissionDetails::default())
        .await
        .unwrap_err();

    match err {
        SubmitError::Api(ApiError::Rejected(comment)) => {
            assert!(comment.contains("not found"), "{comment}");
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[tokio::test]
async fn ok_status_without_result_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/contest.standings"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(r#"{"status":"OK"}"#, "application/json"),
        )
        .mount(&server)
        .await;

    let store = Arc::new(MemoryStore::new());
    let reference = parse_reference(Source::Codeforces, "CF1794E").unwrap();
    let err = service(&server, store.clone())
        .submit(&reference, &SubmissionDetails::default())
        .await
        .unwrap_err();

    assert!(
        matches!(err, SubmitError::Api(ApiError::Malformed(ref m)) if m == "missing result"),
        "{err:?}"
    );
    assert!(store.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn kattis_submission_reads_title_and_rating() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/problems/hello"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"<html><body><h1>Hello World!</h1>
               <div class="metadata"><span class="difficulty_number">1.5</span></div>
               </body></html>"#,
            "text/html; charset=utf-8",
        ))
        .mount(&server)
        .await;

    let store = Arc::new(MemoryStore::new());
    let reference = parse_reference(Source::Kattis, "https://open.kattis.com/problems/hello").unwrap();
    let added = service(&server, store)
        .submit(&reference, &details("lukas", Some(9.0), &["Strings"]))
        .await
        .unwrap();

    assert_eq!(added.identifier, "hello");
    assert_eq!(added.name, "Hello World!");
    assert_eq!(added.difficulty, Some(950));
    assert_eq!(added.tags, vec!["strings".to_string()]);
    assert_eq!(added.source_url, "https://open.kattis.com/problems/hello");
    assert_eq!(added.submitter.profile_url, "https://open.kattis.com/users/lukas");
}

#[tokio::test]
async fn unreachable_kattis_page_falls_back_to_slug_and_estimate() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/problems/bigtruck"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let store = Arc::new(MemoryStore::new());
    let reference = parse_reference(Source::Kattis, "bigtruck").unwrap();
    let added = service(&server, store.clone())
        .submit(&reference, &details("", Some(5.0), &[]))
        .await
        .unwrap();

    assert_eq!(added.name, "Bigtruck");
    assert_eq!(added.difficulty, Some(2000));
    assert!(store.exists_by_url(&added.source_url).await.unwrap());
}

#[tokio::test]
async fn kattis_page_without_rating_and_no_estimate_is_unrated() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/problems/quest"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw("<h1>Quest!</h1>", "text/html"),
        )
        .mount(&server)
        .await;

    let store = Arc::new(MemoryStore::new());
    let reference = parse_reference(Source::Kattis, "quest").unwrap();
    let added = service(&server, store)
        .submit(&reference, &SubmissionDetails::default())
        .await
        .unwrap();

    assert_eq!(added.name, "Quest!");
    assert_eq!(added.difficulty, None);
    assert_eq!(added.kind, None);
}

#[tokio::test]
async fn chosen_type_is_stored_with_the_problem() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/problems/convexhull"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw("<h1>Convex Hull</h1>", "text/html"),
        )
        .mount(&server)
        .await;

    let store = Arc::new(MemoryStore::new());
    let reference = parse_reference(Source::Kattis, "convexhull").unwrap();
    let chosen = SubmissionDetails {
        kind: Some(ProblemType::Geometry),
        ..SubmissionDetails::default()
    };
    let added = service(&server, store.clone())
        .submit(&reference, &chosen)
        .await
        .unwrap();

    assert_eq!(added.kind, Some(ProblemType::Geometry));
    assert_eq!(
        store.get("convexhull").await.unwrap().and_then(|p| p.kind),
        Some(ProblemType::Geometry)
    );
}

#[tokio::test]
async fn known_url_is_rejected_before_any_lookup() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let reference = parse_reference(Source::Kattis, "hello").unwrap();
    let existing = Problem {
        identifier: "hello".to_string(),
        name: "Hello World!".to_string(),
        tags: Vec::new(),
        difficulty: Some(950),
        source_url: reference.canonical_url.clone(),
        solved_count: 0,
        added_on: fixed_now(),
        submitter: Submitter::for_handle(Source::Kattis, ""),
        likes: 0,
        dislikes: 0,
        kind: None,
    };
    let store = Arc::new(MemoryStore::seeded(&FixedSeed(vec![existing])).unwrap());

    let err = service(&server, store.clone())
        .submit(&reference, &SubmissionDetails::default())
        .await
        .unwrap_err();

    match err {
        SubmitError::AlreadyExists { url } => {
            assert_eq!(url, "https://open.kattis.com/problems/hello");
        }
        other => panic!("unexpected error {other:?}"),
    }
    assert_eq!(store.list().await.unwrap().len(), 1);
}

struct FixedRating(f64);

impl PageExtractor for FixedRating {
    fn extract(&self, _html: &str) -> KattisPage {
        KattisPage {
            title: None,
            rating: Some(self.0),
        }
    }
}

#[tokio::test]
async fn custom_extractor_replaces_page_parsing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/problems/carrots"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("<p>redesigned</p>", "text/html"))
        .mount(&server)
        .await;

    let store = Arc::new(MemoryStore::new());
    let fetcher = Arc::new(ReqwestFetcher::new(FetchSettings::default()));
    let kattis = KattisClient::new(fetcher.clone())
        .with_base_url(server.uri())
        .with_extractor(Box::new(FixedRating(10.0)));
    assert_eq!(
        kattis.page_url(&parse_reference(Source::Kattis, "carrots").unwrap()),
        format!("{}/problems/carrots", server.uri())
    );
    let service = SubmissionService::new(store, fetcher)
        .with_kattis(kattis)
        .with_clock(Arc::new(fixed_now));

    let reference = parse_reference(Source::Kattis, "carrots").unwrap();
    let added = service
        .submit(&reference, &SubmissionDetails::default())
        .await
        .unwrap();

    assert_eq!(added.name, "Carrots");
    assert_eq!(added.difficulty, Some(3500));
    assert_eq!(added.added_on, fixed_now());
}
