// [libs/core/math-engine/src/sm3.rs]
/*!
 * =================================================================
 * APARATO: SM3 DIGEST ENGINE (V4.0 - GB/T 32905 STANDARD)
 * CLASIFICACIÓN: CORE MATH (ESTRATO L1)
 * RESPONSABILIDAD: FUNCIÓN DE RESUMEN CRIPTOGRÁFICO DE 256 BITS
 *
 * VISION HIPER-HOLÍSTICA:
 * Implementa la construcción Merkle-Damgård con la función de
 * compresión SM3 publicada (IV oficial, 64 rondas, expansión de
 * mensaje W[0..68] / W'[0..64]). Implementación Rust pura para evitar
 * dependencias de C y facilitar la compilación cruzada.
 * =================================================================
 */

/// Longitud del resumen SM3 en bytes.
pub const SM3_DIGEST_SIZE: usize = 32;

/// Longitud del bloque de compresión en bytes.
pub const SM3_BLOCK_SIZE: usize = 64;

/// Vector de inicialización publicado en GB/T 32905.
const SM3_INITIAL_VECTOR: [u32; 8] = [
    0x7380166F, 0x4914B2B9, 0x172442D7, 0xDA8A0600,
    0xA96F30BC, 0x163138AA, 0xE38DEE4D, 0xB0FB0E4E,
];

#[inline(always)]
fn permutation_p0(value: u32) -> u32 {
    value ^ value.rotate_left(9) ^ value.rotate_left(17)
}

#[inline(always)]
fn permutation_p1(value: u32) -> u32 {
    value ^ value.rotate_left(15) ^ value.rotate_left(23)
}

#[inline(always)]
fn boolean_ff(round_index: usize, x: u32, y: u32, z: u32) -> u32 {
    if round_index < 16 {
        x ^ y ^ z
    } else {
        (x & y) | (x & z) | (y & z)
    }
}

#[inline(always)]
fn boolean_gg(round_index: usize, x: u32, y: u32, z: u32) -> u32 {
    if round_index < 16 {
        x ^ y ^ z
    } else {
        (x & y) | (!x & z)
    }
}

/**
 * Ejecuta la función de compresión sobre un bloque de 64 bytes.
 */
fn compress_block(chaining_state: &mut [u32; 8], block: &[u8; 64]) {
    // Expansión del mensaje: W[0..68] y W'[0..64].
    let mut schedule_w = [0u32; 68];
    for word_index in 0..16 {
        let offset = word_index * 4;
        schedule_w[word_index] = u32::from_be_bytes([
            block[offset],
            block[offset + 1],
            block[offset + 2],
            block[offset + 3],
        ]);
    }
    for word_index in 16..68 {
        schedule_w[word_index] = permutation_p1(
            schedule_w[word_index - 16]
                ^ schedule_w[word_index - 9]
                ^ schedule_w[word_index - 3].rotate_left(15),
        ) ^ schedule_w[word_index - 13].rotate_left(7)
            ^ schedule_w[word_index - 6];
    }
    let mut schedule_w_prime = [0u32; 64];
    for word_index in 0..64 {
        schedule_w_prime[word_index] = schedule_w[word_index] ^ schedule_w[word_index + 4];
    }

    let [mut a, mut b, mut c, mut d, mut e, mut f, mut g, mut h] = *chaining_state;

    for round_index in 0..64 {
        let round_constant: u32 = if round_index < 16 { 0x79CC4519 } else { 0x7A879D8A };
        let ss1 = a
            .rotate_left(12)
            .wrapping_add(e)
            .wrapping_add(round_constant.rotate_left((round_index % 32) as u32))
            .rotate_left(7);
        let ss2 = ss1 ^ a.rotate_left(12);
        let tt1 = boolean_ff(round_index, a, b, c)
            .wrapping_add(d)
            .wrapping_add(ss2)
            .wrapping_add(schedule_w_prime[round_index]);
        let tt2 = boolean_gg(round_index, e, f, g)
            .wrapping_add(h)
            .wrapping_add(ss1)
            .wrapping_add(schedule_w[round_index]);
        d = c;
        c = b.rotate_left(9);
        b = a;
        a = tt1;
        h = g;
        g = f.rotate_left(19);
        f = e;
        e = permutation_p0(tt2);
    }

    chaining_state[0] ^= a;
    chaining_state[1] ^= b;
    chaining_state[2] ^= c;
    chaining_state[3] ^= d;
    chaining_state[4] ^= e;
    chaining_state[5] ^= f;
    chaining_state[6] ^= g;
    chaining_state[7] ^= h;
}

/**
 * Estado de absorción SM3: valor de encadenamiento de 256 bits, buffer
 * de bloque de 64 bytes y contador de longitud de 64 bits.
 *
 * Ciclo de vida absorb-then-finalize: 'absorb' admite llamadas
 * repetidas; 'finalize' consume el estado.
 */
#[derive(Debug, Clone)]
pub struct Sm3Engine {
    chaining_state: [u32; 8],
    block_buffer: [u8; 64],
    buffered_octets: usize,
    absorbed_octets: u64,
}

impl Sm3Engine {
    /// Inicializa el estado con el IV publicado.
    #[must_use]
    pub fn new() -> Self {
        Self {
            chaining_state: SM3_INITIAL_VECTOR,
            block_buffer: [0u8; 64],
            buffered_octets: 0,
            absorbed_octets: 0,
        }
    }

    /**
     * Absorbe octetos en el estado, comprimiendo cada bloque completo.
     */
    pub fn absorb(&mut self, data: &[u8]) {
        self.absorbed_octets = self.absorbed_octets.wrapping_add(data.len() as u64);
        let mut remaining = data;

        if self.buffered_octets > 0 {
            let capacity = SM3_BLOCK_SIZE - self.buffered_octets;
            let take = capacity.min(remaining.len());
            self.block_buffer[self.buffered_octets..self.buffered_octets + take]
                .copy_from_slice(&remaining[..take]);
            self.buffered_octets += take;
            remaining = &remaining[take..];

            if self.buffered_octets == SM3_BLOCK_SIZE {
                let full_block = self.block_buffer;
                compress_block(&mut self.chaining_state, &full_block);
                self.buffered_octets = 0;
            }
        }

        while remaining.len() >= SM3_BLOCK_SIZE {
            let mut full_block = [0u8; 64];
            full_block.copy_from_slice(&remaining[..SM3_BLOCK_SIZE]);
            compress_block(&mut self.chaining_state, &full_block);
            remaining = &remaining[SM3_BLOCK_SIZE..];
        }

        if !remaining.is_empty() {
            self.block_buffer[..remaining.len()].copy_from_slice(remaining);
            self.buffered_octets = remaining.len();
        }
    }

    /**
     * Sella el estado y produce el resumen de 32 bytes.
     *
     * # Mathematical Proof (Padding):
     * Se anexa 0x80, ceros y la longitud en bits como entero Big-Endian
     * de 64 bits, de modo que la longitud total sea múltiplo de 64.
     */
    #[must_use]
    pub fn finalize(mut self) -> [u8; SM3_DIGEST_SIZE] {
        let bit_length = self.absorbed_octets.wrapping_mul(8);

        self.block_buffer[self.buffered_octets] = 0x80;
        self.buffered_octets += 1;

        if self.buffered_octets > SM3_BLOCK_SIZE - 8 {
            for slot in self.block_buffer[self.buffered_octets..].iter_mut() {
                *slot = 0;
            }
            let full_block = self.block_buffer;
            compress_block(&mut self.chaining_state, &full_block);
            self.buffered_octets = 0;
        }

        for slot in self.block_buffer[self.buffered_octets..SM3_BLOCK_SIZE - 8].iter_mut() {
            *slot = 0;
        }
        self.block_buffer[SM3_BLOCK_SIZE - 8..].copy_from_slice(&bit_length.to_be_bytes());
        let final_block = self.block_buffer;
        compress_block(&mut self.chaining_state, &final_block);

        let mut digest_output = [0u8; SM3_DIGEST_SIZE];
        for (word_index, state_word) in self.chaining_state.iter().enumerate() {
            digest_output[word_index * 4..word_index * 4 + 4]
                .copy_from_slice(&state_word.to_be_bytes());
        }
        digest_output
    }
}

impl Default for Sm3Engine {
    fn default() -> Self {
        Self::new()
    }
}

/**
 * Resumen SM3 de un solo disparo.
 */
#[inline]
#[must_use]
pub fn sm3_digest(data: &[u8]) -> [u8; SM3_DIGEST_SIZE] {
    let mut engine = Sm3Engine::new();
    engine.absorb(data);
    engine.finalize()
}
