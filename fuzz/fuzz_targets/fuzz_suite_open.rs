#![no_main]

use libfuzzer_sys::fuzz_target;

use ephemeral_cipher::CipherSuite;

/// Structured input for the AEAD opening fuzzer.
/// The fuzzer picks a suite and supplies arbitrary nonce, aad and ciphertext,
/// attempting to find inputs that cause panics (as opposed to clean error returns).
struct OpenInput<'a> {
    suite: CipherSuite,
    nonce: &'a [u8],
    aad: &'a [u8],
    ciphertext: &'a [u8],
}

fn parse_input(data: &[u8]) -> Option<OpenInput<'_>> {
    // 1 (suite) + 1 (nonce len) + 1 (aad len) + nonce + aad + ciphertext
    if data.len() < 3 {
        return None;
    }
    let suite = CipherSuite::ALL[usize::from(data[0]) % CipherSuite::ALL.len()];
    let nonce_len = usize::from(data[1] % 32);
    let aad_len = usize::from(data[2]);
    let rest = &data[3..];
    if rest.len() < nonce_len + aad_len {
        return None;
    }
    let (nonce, rest) = rest.split_at(nonce_len);
    let (aad, ciphertext) = rest.split_at(aad_len);
    Some(OpenInput {
        suite,
        nonce,
        aad,
        ciphertext,
    })
}

fuzz_target!(|data: &[u8]| {
    let Some(input) = parse_input(data) else {
        return;
    };

    // Fixed key: we're testing that open never panics on any nonce length,
    // ciphertext length or content.
    let aead = input.suite.construct(&[0x42; 32]).unwrap();

    let _ = aead.open(input.nonce, input.ciphertext, input.aad);

    let mut buffer = input.ciphertext.to_vec();
    let _ = aead.open_in_place(input.nonce, input.aad, &mut buffer);
});
