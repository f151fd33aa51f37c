// Startup catalogue: Tokyo weekend events, nearby places, demo account

use crate::auth::password::{Password, PasswordHasher};
use crate::core::errors::EventsError;
use crate::core::models::{Coordinates, Event, ExternalLinks, Location, NearbyPlace, PlaceType};
use crate::state::memory_store::InMemoryStore;
use crate::state::UserStore;
use chrono::{DateTime, Duration, Utc};
use tracing::info;

pub const DEMO_EMAIL: &str = "test@example.com";
pub const DEMO_USERNAME: &str = "testuser";
pub const DEMO_PASSWORD: &str = "password123";

/// Build a store holding the seed catalogue, the demo user and its favorites
pub fn seeded_store(hasher: PasswordHasher) -> Result<InMemoryStore, EventsError> {
    let store = InMemoryStore::new(seed_events(Utc::now()), seed_places(), hasher);

    let demo = store.create_user(DEMO_EMAIL, DEMO_USERNAME, &Password::new(DEMO_PASSWORD))?;
    store.add_favorite(demo.id, 1);
    store.add_favorite(demo.id, 3);

    info!(
        events = store.event_count(),
        users = store.user_count(),
        "Seed data loaded"
    );
    Ok(store)
}

fn location(name: &str, address: &str, latitude: f64, longitude: f64, area: &str, station: &str) -> Location {
    Location {
        name: name.to_string(),
        address: address.to_string(),
        coordinates: Coordinates { latitude, longitude },
        area: area.to_string(),
        station: Some(station.to_string()),
    }
}

fn links(website: Option<&str>, instagram: Option<&str>, twitter: Option<&str>) -> ExternalLinks {
    ExternalLinks {
        website: website.map(str::to_string),
        instagram: instagram.map(str::to_string),
        twitter: twitter.map(str::to_string),
    }
}

/// (days, hours) after `now`
fn at(now: DateTime<Utc>, days: i64, hours: i64) -> DateTime<Utc> {
    now + Duration::days(days) + Duration::hours(hours)
}

/// The twelve seed events, timed relative to `now`
pub fn seed_events(now: DateTime<Utc>) -> Vec<Event> {
    let event = |id: u64,
                 name: &str,
                 description: &str,
                 (start, end): ((i64, i64), (i64, i64)),
                 location: Location,
                 category: &str,
                 external_links: ExternalLinks,
                 price: f64,
                 capacity: Option<u32>| Event {
        id,
        name: name.to_string(),
        description: description.to_string(),
        start_datetime: at(now, start.0, start.1),
        end_datetime: at(now, end.0, end.1),
        location,
        category: category.to_string(),
        external_links,
        price: Some(price),
        capacity,
    };

    vec![
        event(
            1,
            "東京アートフェスティバル",
            "週末に開催される東京最大のアートフェスティバル。様々なアーティストによる展示やパフォーマンスをお楽しみください。",
            ((2, 10), (2, 18)),
            location("上野公園", "東京都台東区上野公園", 35.7151, 139.7734, "上野", "上野駅"),
            "アート",
            links(
                Some("https://example.com/tokyo-art-festival"),
                Some("https://instagram.com/tokyoartfest"),
                Some("https://twitter.com/tokyoartfest"),
            ),
            1000.0,
            Some(5000),
        ),
        event(
            2,
            "渋谷ミュージックフェス",
            "渋谷の中心部で開催される音楽フェスティバル。人気バンドやDJによるライブパフォーマンスを体験しよう。",
            ((3, 12), (3, 22)),
            location("渋谷ストリームホール", "東京都渋谷区渋谷3-21-3", 35.6580, 139.7016, "渋谷", "渋谷駅"),
            "音楽",
            links(
                Some("https://example.com/shibuya-music-fest"),
                Some("https://instagram.com/shibuyamusicfest"),
                Some("https://twitter.com/shibuyamusicfest"),
            ),
            3500.0,
            Some(2000),
        ),
        event(
            3,
            "池袋フードフェスティバル",
            "池袋エリアの飲食店が集結する食のイベント。様々な国の料理や地元の名物を楽しめます。",
            ((1, 11), (1, 20)),
            location("池袋西口公園", "東京都豊島区西池袋1-8-26", 35.7295, 139.7109, "池袋", "池袋駅"),
            "フード",
            links(
                Some("https://example.com/ikebukuro-food-fest"),
                Some("https://instagram.com/ikebukurofoodfest"),
                None,
            ),
            500.0,
            Some(3000),
        ),
        event(
            4,
            "新宿アニメコンベンション",
            "アニメファン必見のイベント。コスプレコンテスト、声優トークショー、グッズ販売などが行われます。",
            ((4, 10), (5, 18)),
            location("新宿NSビル", "東京都新宿区西新宿2-4-1", 35.6934, 139.6935, "新宿", "新宿駅"),
            "アニメ",
            links(
                Some("https://example.com/shinjuku-anime-con"),
                None,
                Some("https://twitter.com/shinjukuanimecon"),
            ),
            2000.0,
            Some(10000),
        ),
        event(
            5,
            "北千住クラフトマーケット",
            "手作りの工芸品や雑貨が集まるマーケット。地元作家によるワークショップも開催されます。",
            ((6, 10), (6, 16)),
            location("北千住マルイ前広場", "東京都足立区千住3-92", 35.7489, 139.8007, "北千住", "北千住駅"),
            "マーケット",
            links(None, Some("https://instagram.com/kitasenju_craftmarket"), None),
            0.0,
            Some(1000),
        ),
        event(
            6,
            "六本木アートナイト",
            "一夜限りのアートの祭典。美術館やギャラリーが深夜まで開館し、街中がアート作品で彩られます。",
            ((5, 16), (6, 5)),
            location("六本木ヒルズ", "東京都港区六本木6-10-1", 35.6604, 139.7292, "六本木", "六本木駅"),
            "アート",
            links(
                Some("https://example.com/roppongi-art-night"),
                Some("https://instagram.com/roppongiartnightofficial"),
                Some("https://twitter.com/roppongiartnigh"),
            ),
            0.0,
            Some(50000),
        ),
        event(
            7,
            "お台場ビーチフェスティバル",
            "都心の人工ビーチで開催される夏のフェスティバル。ビーチスポーツやBBQ、音楽ライブなどが楽しめます。",
            ((7, 10), (7, 20)),
            location("お台場海浜公園", "東京都港区台場1-4-1", 35.6300, 139.7750, "お台場", "お台場海浜公園駅"),
            "フェスティバル",
            links(
                Some("https://example.com/odaiba-beach-festival"),
                Some("https://instagram.com/odaibabeachfest"),
                None,
            ),
            1500.0,
            Some(8000),
        ),
        event(
            8,
            "銀座ファッションウィーク",
            "銀座の各ショップが参加するファッションイベント。最新トレンドのファッションショーやワークショップが開催されます。",
            ((8, 11), (14, 20)),
            location("銀座三越", "東京都中央区銀座4-6-16", 35.6713, 139.7636, "銀座", "銀座駅"),
            "ファッション",
            links(
                Some("https://example.com/ginza-fashion-week"),
                Some("https://instagram.com/ginzafashionweek"),
                Some("https://twitter.com/ginzafashionwk"),
            ),
            0.0,
            None,
        ),
        event(
            9,
            "東京駅グルメフェア",
            "東京駅構内の飲食店が参加するグルメイベント。限定メニューや特別価格のセットが楽しめます。",
            ((2, 10), (8, 22)),
            location("東京駅一番街", "東京都千代田区丸の内1-9-1", 35.6812, 139.7671, "東京", "東京駅"),
            "フード",
            links(Some("https://example.com/tokyo-station-gourmet-fair"), None, None),
            0.0,
            None,
        ),
        event(
            10,
            "日比谷音楽祭",
            "日比谷公園で開催される無料の音楽フェスティバル。様々なジャンルのミュージシャンによるライブが楽しめます。",
            ((9, 12), (10, 20)),
            location("日比谷公園大音楽堂", "東京都千代田区日比谷公園1-5", 35.6731, 139.7588, "日比谷", "日比谷駅"),
            "音楽",
            links(
                Some("https://example.com/hibiya-music-festival"),
                None,
                Some("https://twitter.com/hibiyamusicfest"),
            ),
            0.0,
            Some(3000),
        ),
        event(
            11,
            "丸の内イルミネーション",
            "丸の内エリア一帯で開催される冬の風物詩。約200本の街路樹が約100万球のLEDで彩られます。",
            ((10, 17), (90, 23)),
            location("丸の内仲通り", "東京都千代田区丸の内1丁目", 35.6809, 139.7650, "丸の内", "東京駅"),
            "イルミネーション",
            links(
                Some("https://example.com/marunouchi-illumination"),
                Some("https://instagram.com/marunouchiillumination"),
                None,
            ),
            0.0,
            None,
        ),
        event(
            12,
            "浅草三社祭",
            "浅草神社の例大祭。神輿の担ぎ手や纏持ちなど約500人の町会員が参加する勇壮な祭りです。",
            ((15, 9), (17, 18)),
            location("浅草神社", "東京都台東区浅草2-3-1", 35.7147, 139.7966, "浅草", "浅草駅"),
            "祭り",
            links(
                Some("https://example.com/asakusa-sanja-matsuri"),
                Some("https://instagram.com/asakusasanjamatsuri"),
                Some("https://twitter.com/asakusasanja"),
            ),
            0.0,
            None,
        ),
    ]
}

/// The twelve seed places
pub fn seed_places() -> Vec<NearbyPlace> {
    let place = |id: u64,
                 name: &str,
                 place_type: PlaceType,
                 (address, latitude, longitude): (&str, f64, f64),
                 (area, station): (&str, &str),
                 rating: f64,
                 price_level: u8,
                 description: &str| NearbyPlace {
        id,
        name: name.to_string(),
        place_type,
        location: location(name, address, latitude, longitude, area, station),
        rating: Some(rating),
        price_level: Some(price_level),
        description: Some(description.to_string()),
    };

    vec![
        place(1, "上野寿司", PlaceType::Restaurant, ("東京都台東区上野7-1-1", 35.7141, 139.7744), ("上野", "上野駅"), 4.5, 3, "伝統的な江戸前寿司を提供する老舗店"),
        place(2, "渋谷カフェ", PlaceType::Cafe, ("東京都渋谷区宇田川町15-1", 35.6590, 139.7010), ("渋谷", "渋谷駅"), 4.2, 2, "おしゃれな空間でくつろげるカフェ"),
        place(3, "池袋ホテル", PlaceType::Hotel, ("東京都豊島区東池袋1-5-6", 35.7300, 139.7120), ("池袋", "池袋駅"), 4.0, 3, "駅から徒歩5分の便利なビジネスホテル"),
        place(4, "新宿居酒屋", PlaceType::Restaurant, ("東京都新宿区歌舞伎町1-2-3", 35.6938, 139.7030), ("新宿", "新宿駅"), 4.3, 2, "新鮮な魚介類と日本酒が自慢の居酒屋"),
        place(5, "北千住ネットカフェ", PlaceType::Entertainment, ("東京都足立区千住2-20", 35.7485, 139.8015), ("北千住", "北千住駅"), 3.8, 1, "24時間営業の快適なネットカフェ"),
        place(6, "六本木バー", PlaceType::Restaurant, ("東京都港区六本木7-4-5", 35.6622, 139.7310), ("六本木", "六本木駅"), 4.6, 4, "夜景が美しい高層階のカクテルバー"),
        place(7, "お台場レストラン", PlaceType::Restaurant, ("東京都港区台場1-7-1", 35.6290, 139.7730), ("お台場", "台場駅"), 4.1, 3, "海を眺めながら食事ができるレストラン"),
        place(8, "銀座高級ホテル", PlaceType::Hotel, ("東京都中央区銀座5-10-1", 35.6720, 139.7650), ("銀座", "銀座駅"), 4.8, 5, "銀座の中心に位置する5つ星ホテル"),
        place(9, "東京駅カフェ", PlaceType::Cafe, ("東京都千代田区丸の内1-9-1", 35.6812, 139.7671), ("東京", "東京駅"), 4.0, 2, "駅構内にある便利なカフェ"),
        place(10, "日比谷バー", PlaceType::Restaurant, ("東京都千代田区有楽町1-1-2", 35.6731, 139.7588), ("日比谷", "日比谷駅"), 4.4, 3, "クラシックな雰囲気のカクテルバー"),
        place(11, "丸の内カフェ", PlaceType::Cafe, ("東京都千代田区丸の内2-4-1", 35.6809, 139.7650), ("丸の内", "東京駅"), 4.2, 2, "ビジネスマンに人気のモダンなカフェ"),
        place(12, "浅草旅館", PlaceType::Hotel, ("東京都台東区浅草1-5-3", 35.7147, 139.7966), ("浅草", "浅草駅"), 4.3, 2, "伝統的な和風旅館"),
    ]
}
