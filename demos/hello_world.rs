use docscript::errors::DocumentError;
use docscript::{Document, JsonJarStore};
use env_logger::Env;

fn main() -> Result<(), DocumentError> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    // Jars minted from this store survive across runs; session cookies do not.
    let store = JsonJarStore::new("cookies.json".into());

    let doc = Document::builder()
        .id("5d2b8c1e-70a4-4c4f-9d3a-2f8e6b1c0a97".into())
        .url("https://example.com/")
        .jar_store(store)
        .create()?;

    // Greet once the document is ready
    doc.greeter().say_hello(None);
    doc.greeter().say_hello(Some("Ann"));

    let cookies = doc.cookies();

    cookies.set_cookie("theme", "dark", None, None);
    cookies.set_session_cookie("visited", "yes", None);
    println!("theme          = {:?}", cookies.get_cookie("theme"));
    println!("document jar   = {:?}", doc.cookie_string());

    cookies.delete_cookie("theme", None);
    println!("after deletion = {:?}", cookies.get_cookie("theme"));

    Ok(())
}
