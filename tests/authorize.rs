use pretty_assertions::assert_eq;

use tgrep::{
    hmac_sha1, make_authorized_request, parameter_string, signature_base_string, signing_key,
    FixedClock, FixedNonce, OAuthClientProvider, Parameters, Secrets, Signer,
};

// https://developer.twitter.com/en/docs/authentication/oauth-1-0a/creating-a-signature
const ENDPOINT: &str = "https://api.twitter.com/1.1/statuses/update.json";
const CONSUMER_KEY: &str = "xvz1evFS4wEEPTGEFPHBog";
const CONSUMER_SECRET: &str = "kAcSOqF21Fu85e7zjz7ZN2U4ZRhfV3WpwPAoE3Z7kBw";
const TOKEN: &str = "370773112-GmHxMAgYyLbNEtIKZeRNFsMKPR9EyMZeS9weJAEb";
const TOKEN_SECRET: &str = "LswwdoUaIvS8ltyTt5jkRh4J50vUPVVHtR2YPi5kE";
const NONCE: &str = "kYjzVBB8Y0ZFabxSWbWovY3uYSQ2pTgmZeNu2VS4cg";
const TIMESTAMP: i64 = 1_318_622_958;
const STATUS: &str = "Hello Ladies + Gentlemen, a signed OAuth request!";

const EXPECTED_HEADER: &str = "OAuth oauth_consumer_key=\"xvz1evFS4wEEPTGEFPHBog\", \
     oauth_nonce=\"kYjzVBB8Y0ZFabxSWbWovY3uYSQ2pTgmZeNu2VS4cg\", \
     oauth_signature=\"hCtSmYh%2BiHYCEqBWrE7C7hYmtUk%3D\", \
     oauth_signature_method=\"HMAC-SHA1\", \
     oauth_timestamp=\"1318622958\", \
     oauth_token=\"370773112-GmHxMAgYyLbNEtIKZeRNFsMKPR9EyMZeS9weJAEb\", \
     oauth_version=\"1.0\"";

fn status_params() -> Parameters {
    let mut params = Parameters::new();
    params.insert("include_entities".into(), "true".into());
    params.insert("status".into(), STATUS.into());
    params
}

#[test]
fn signature_steps_match_documentation() {
    let mut params = status_params();
    params.insert("oauth_consumer_key".into(), CONSUMER_KEY.into());
    params.insert("oauth_nonce".into(), NONCE.into());
    params.insert("oauth_signature_method".into(), "HMAC-SHA1".into());
    params.insert("oauth_timestamp".into(), TIMESTAMP.to_string());
    params.insert("oauth_token".into(), TOKEN.into());
    params.insert("oauth_version".into(), "1.0".into());

    let parameter_string = parameter_string(&params);
    assert_eq!(
        parameter_string,
        "include_entities=true&oauth_consumer_key=xvz1evFS4wEEPTGEFPHBog&\
         oauth_nonce=kYjzVBB8Y0ZFabxSWbWovY3uYSQ2pTgmZeNu2VS4cg&\
         oauth_signature_method=HMAC-SHA1&oauth_timestamp=1318622958&\
         oauth_token=370773112-GmHxMAgYyLbNEtIKZeRNFsMKPR9EyMZeS9weJAEb&\
         oauth_version=1.0&\
         status=Hello%20Ladies%20%2B%20Gentlemen%2C%20a%20signed%20OAuth%20request%21"
    );

    let base_string = signature_base_string("POST", ENDPOINT, &parameter_string);
    assert_eq!(
        base_string,
        "POST&https%3A%2F%2Fapi.twitter.com%2F1.1%2Fstatuses%2Fupdate.json&\
         include_entities%3Dtrue%26oauth_consumer_key%3Dxvz1evFS4wEEPTGEFPHBog%26\
         oauth_nonce%3DkYjzVBB8Y0ZFabxSWbWovY3uYSQ2pTgmZeNu2VS4cg%26\
         oauth_signature_method%3DHMAC-SHA1%26oauth_timestamp%3D1318622958%26\
         oauth_token%3D370773112-GmHxMAgYyLbNEtIKZeRNFsMKPR9EyMZeS9weJAEb%26\
         oauth_version%3D1.0%26\
         status%3DHello%2520Ladies%2520%252B%2520Gentlemen%252C%2520a%2520signed%2520OAuth%2520request%2521"
    );

    let key = signing_key(CONSUMER_SECRET, TOKEN_SECRET);
    assert_eq!(
        key,
        "kAcSOqF21Fu85e7zjz7ZN2U4ZRhfV3WpwPAoE3Z7kBw&LswwdoUaIvS8ltyTt5jkRh4J50vUPVVHtR2YPi5kE"
    );
    assert_eq!(hmac_sha1(&key, &base_string), "hCtSmYh+iHYCEqBWrE7C7hYmtUk=");
}

#[test]
fn signer_renders_documented_header() {
    let secrets = Secrets::new(CONSUMER_KEY, CONSUMER_SECRET).token(TOKEN, TOKEN_SECRET);
    let signer = Signer::new(&secrets)
        .with_clock(FixedClock(TIMESTAMP))
        .with_nonce_generator(FixedNonce::new(NONCE));

    let header = signer
        .generate_signature("POST", ENDPOINT, &status_params())
        .unwrap();
    assert_eq!(header, EXPECTED_HEADER);

    let request = signer.authorize("post", ENDPOINT, &status_params()).unwrap();
    assert_eq!(request.method().as_str(), "POST");
    assert_eq!(request.url().as_str(), ENDPOINT);
    assert_eq!(request.headers()["authorization"], EXPECTED_HEADER);
    assert_eq!(
        request.headers()["content-type"],
        "application/x-www-form-urlencoded"
    );
}

#[test]
fn client_wrapper_matches_signer() {
    let secrets = Secrets::new(CONSUMER_KEY, CONSUMER_SECRET).token(TOKEN, TOKEN_SECRET);
    let signer = Signer::new(&secrets)
        .with_clock(FixedClock(TIMESTAMP))
        .with_nonce_generator(FixedNonce::new(NONCE));

    let request = reqwest::Client::new()
        .oauth1_with_signer(signer)
        .post(ENDPOINT)
        .form(&[("include_entities", "true"), ("status", STATUS)])
        .build()
        .unwrap();
    assert_eq!(request.headers()["authorization"], EXPECTED_HEADER);
}

#[test]
fn random_requests_differ() {
    let secrets = Secrets::new(CONSUMER_KEY, CONSUMER_SECRET).token(TOKEN, TOKEN_SECRET);
    let first = make_authorized_request(&secrets, "POST", ENDPOINT, &status_params()).unwrap();
    let second = make_authorized_request(&secrets, "POST", ENDPOINT, &status_params()).unwrap();
    assert_ne!(
        first.headers()["authorization"],
        second.headers()["authorization"]
    );
    assert_eq!(
        first.body().and_then(|b| b.as_bytes()),
        second.body().and_then(|b| b.as_bytes())
    );
}
